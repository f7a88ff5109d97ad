//! Commands for the Tour Controller, one per view-facing tour event.

use aurora_core::command::Command;
use uuid::Uuid;

/// Entity selected: mount a tour for its panel.
#[derive(Debug, Clone)]
pub struct MountTour {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The selected entity.
    pub slug: String,
}

/// "Start Tour" pressed.
#[derive(Debug, Clone)]
pub struct StartTour {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The mounted tour.
    pub tour_id: Uuid,
}

/// "Next" (or "Finish" on the last step) pressed.
#[derive(Debug, Clone)]
pub struct AdvanceTour {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The mounted tour.
    pub tour_id: Uuid,
}

/// Tour overlay closed.
#[derive(Debug, Clone)]
pub struct CloseTour {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The mounted tour.
    pub tour_id: Uuid,
}

/// Entity panel unmounted.
#[derive(Debug, Clone)]
pub struct UnmountTour {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The mounted tour.
    pub tour_id: Uuid,
}

macro_rules! tour_command {
    ($ty:ty, $event:literal) => {
        impl Command for $ty {
            fn event_name(&self) -> &'static str {
                $event
            }

            fn correlation_id(&self) -> Uuid {
                self.correlation_id
            }
        }
    };
}

tour_command!(StartTour, "tour-start");
tour_command!(AdvanceTour, "tour-next");
tour_command!(CloseTour, "tour-close");
tour_command!(UnmountTour, "tour-unmount");

impl Command for MountTour {
    fn event_name(&self) -> &'static str {
        "entity-selected"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_name_their_view_event() {
        let correlation_id = Uuid::new_v4();
        let tour_id = Uuid::new_v4();
        let mount = MountTour {
            correlation_id,
            slug: "mars".to_owned(),
        };
        let commands: [&dyn Command; 5] = [
            &mount,
            &StartTour { correlation_id, tour_id },
            &AdvanceTour { correlation_id, tour_id },
            &CloseTour { correlation_id, tour_id },
            &UnmountTour { correlation_id, tour_id },
        ];

        let names: Vec<&str> = commands.iter().map(|c| c.event_name()).collect();

        assert_eq!(
            names,
            ["entity-selected", "tour-start", "tour-next", "tour-close", "tour-unmount"]
        );
        assert!(commands.iter().all(|c| c.correlation_id() == correlation_id));
    }
}
