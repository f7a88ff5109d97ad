//! Commands sent from the controllers back to the view.

use serde::Serialize;

/// An instruction for the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewCommand {
    /// Open the entity detail panel for `slug`.
    OpenEntity {
        /// Entity to open.
        slug: String,
    },
    /// Move the 3D camera onto `slug`.
    FocusCamera {
        /// Entity to focus.
        slug: String,
    },
    /// Show the tour overlay on a step.
    ShowTourOverlay {
        /// Zero-based step index.
        step_index: usize,
        /// Number of steps in the tour.
        total_steps: usize,
        /// Step text.
        text: String,
    },
    /// Hide the tour overlay.
    HideTourOverlay,
}

impl ViewCommand {
    /// Commands that bring `slug` into view: focus the camera, then open the
    /// panel.
    #[must_use]
    pub fn visit(slug: &str) -> Vec<Self> {
        vec![
            Self::FocusCamera {
                slug: slug.to_owned(),
            },
            Self::OpenEntity {
                slug: slug.to_owned(),
            },
        ]
    }
}
