//! In-memory tour state for one mounted entity panel.

use aurora_core::error::DomainError;
use aurora_core::variant::StyleVariant;
use aurora_core::view::ViewCommand;

/// The step currently shown in the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    /// Zero-based step index.
    pub index: usize,
    /// Number of steps in the tour.
    pub total: usize,
    /// Step text.
    pub text: String,
}

impl StepView {
    /// The view command that shows this step.
    #[must_use]
    pub fn overlay(&self) -> ViewCommand {
        ViewCommand::ShowTourOverlay {
            step_index: self.index,
            total_steps: self.total,
            text: self.text.clone(),
        }
    }
}

/// Tour state for one entity: the steps and which one, if any, is shown.
#[derive(Debug)]
pub struct TourSession {
    slug: String,
    variant: StyleVariant,
    steps: Vec<String>,
    /// `None` while the overlay is hidden.
    active_step: Option<usize>,
}

impl TourSession {
    /// Creates a session with no steps and the overlay hidden.
    #[must_use]
    pub fn new(slug: impl Into<String>, variant: StyleVariant) -> Self {
        Self {
            slug: slug.into(),
            variant,
            steps: Vec::new(),
            active_step: None,
        }
    }

    /// Entity slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Style variant fixed for this mount.
    #[must_use]
    pub fn variant(&self) -> StyleVariant {
        self.variant
    }

    /// Loaded steps, possibly empty.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Whether steps have been loaded.
    #[must_use]
    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Index of the step shown, `None` while the overlay is hidden.
    #[must_use]
    pub fn active_step(&self) -> Option<usize> {
        self.active_step
    }

    /// Whether the overlay shows the last step.
    #[must_use]
    pub fn is_on_last_step(&self) -> bool {
        self.has_steps() && self.active_step == Some(self.steps.len() - 1)
    }

    /// Replaces the steps. The shown step, if any, is kept in range.
    pub fn load_steps(&mut self, steps: Vec<String>) {
        self.steps = steps;
        self.active_step = match self.active_step {
            Some(_) if self.steps.is_empty() => None,
            Some(i) => Some(i.min(self.steps.len() - 1)),
            None => None,
        };
    }

    /// The step shown, if any.
    #[must_use]
    pub fn current_step(&self) -> Option<StepView> {
        let index = self.active_step?;
        Some(StepView {
            index,
            total: self.steps.len(),
            text: self.steps[index].clone(),
        })
    }

    /// Shows the first step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no steps are loaded.
    pub fn begin(&mut self) -> Result<StepView, DomainError> {
        if self.steps.is_empty() {
            return Err(DomainError::Validation(format!(
                "tour for {} has no steps",
                self.slug
            )));
        }
        self.active_step = Some(0);
        Ok(StepView {
            index: 0,
            total: self.steps.len(),
            text: self.steps[0].clone(),
        })
    }

    /// Moves to the next step, clamped to the last one. The hidden state
    /// counts as step 0, so this shows step 1 when there is one. Returns
    /// `None` if no steps are loaded.
    pub fn advance(&mut self) -> Option<StepView> {
        let last = self.steps.len().checked_sub(1)?;
        let index = (self.active_step.unwrap_or(0) + 1).min(last);
        self.active_step = Some(index);
        Some(StepView {
            index,
            total: self.steps.len(),
            text: self.steps[index].clone(),
        })
    }

    /// Hides the overlay. Steps are kept.
    pub fn reset(&mut self) {
        self.active_step = None;
    }
}
