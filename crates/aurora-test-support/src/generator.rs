//! Test generator — scripted `ContentGenerator` implementation for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use aurora_core::error::GatewayError;
use aurora_core::gateway::{ContentGenerator, GenerationRequest};
use tokio::sync::Notify;

/// A generator that replays scripted replies in order and records every
/// request. Once the script is exhausted the last reply is repeated.
#[derive(Debug)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<Vec<String>, GatewayError>>>,
    last: Mutex<Result<Vec<String>, GatewayError>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    /// Create a generator that replays `replies`.
    ///
    /// # Panics
    ///
    /// Panics if `replies` is empty.
    #[must_use]
    pub fn new(replies: Vec<Result<Vec<String>, GatewayError>>) -> Self {
        let last = replies
            .last()
            .cloned()
            .expect("ScriptedGenerator needs at least one reply");
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(last),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A generator that always returns `steps`.
    #[must_use]
    pub fn always<S: Into<String>>(steps: impl IntoIterator<Item = S>) -> Self {
        Self::new(vec![Ok(steps.into_iter().map(Into::into).collect())])
    }

    /// A generator that returns `count` numbered steps (`"fact 1"`, ...).
    #[must_use]
    pub fn numbered(count: usize) -> Self {
        Self::new(vec![Ok((1..=count).map(|i| format!("fact {i}")).collect())])
    }

    /// A generator that always fails with `error`.
    #[must_use]
    pub fn failing(error: GatewayError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Returns a snapshot of all requests received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the number of requests received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate_steps(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<String>, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(reply) => reply,
            None => self.last.lock().unwrap().clone(),
        }
    }
}

/// A scripted generator that holds each reply until the test releases it,
/// standing in for a slow generation call.
#[derive(Debug)]
pub struct GatedGenerator {
    inner: ScriptedGenerator,
    entered: Notify,
    gate: Notify,
}

impl GatedGenerator {
    /// Wrap `inner`, gating each of its replies.
    #[must_use]
    pub fn new(inner: ScriptedGenerator) -> Self {
        Self {
            inner,
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Waits until a request is being held.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one held request (or the next one to arrive) reply.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Returns the number of requests that got their reply.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.call_count()
    }
}

#[async_trait]
impl ContentGenerator for GatedGenerator {
    async fn generate_steps(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<String>, GatewayError> {
        self.entered.notify_one();
        self.gate.notified().await;
        self.inner.generate_steps(request).await
    }
}
