//! In-memory registry of live sessions (mounted tours, active routes).

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::DomainError;

/// How long a session may go untouched before the next insert evicts it.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct Entry<T> {
    session: Arc<Mutex<T>>,
    touched: Instant,
}

/// Live sessions keyed by identifier. Each session has its own async mutex,
/// so events for one session are handled one at a time while other sessions
/// proceed independently.
///
/// Sessions that were not looked up for longer than the idle timeout are
/// swept on the next insert. A panel that goes away without unmounting is
/// dropped that way.
#[derive(Debug)]
pub struct SessionRegistry<T> {
    sessions: RwLock<HashMap<Uuid, Entry<T>>>,
    idle_timeout: Duration,
}

impl<T> Default for SessionRegistry<T> {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl<T> SessionRegistry<T> {
    /// Creates an empty registry with [`DEFAULT_IDLE_TIMEOUT`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry evicting sessions idle for longer than
    /// `idle_timeout`.
    #[must_use]
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Registers `session` under a fresh identifier, evicting idle sessions
    /// first.
    pub fn insert(&self, session: T) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.touched) <= self.idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, "evicted idle sessions");
        }
        sessions.insert(
            id,
            Entry {
                session: Arc::new(Mutex::new(session)),
                touched: now,
            },
        );
        id
    }

    /// Looks up a session and marks it as used.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if `id` is not registered.
    pub fn get(&self, id: Uuid) -> Result<Arc<Mutex<T>>, DomainError> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let entry = sessions
            .get_mut(&id)
            .ok_or(DomainError::SessionNotFound(id))?;
        entry.touched = Instant::now();
        Ok(Arc::clone(&entry.session))
    }

    /// Removes a session, returning it if it was registered.
    pub fn remove(&self, id: Uuid) -> Option<Arc<Mutex<T>>> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .map(|entry| entry.session)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
