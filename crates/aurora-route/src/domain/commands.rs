//! Commands for the Route Controller, one per view-facing route event.

use aurora_core::command::Command;
use uuid::Uuid;

/// "Start Route" pressed.
#[derive(Debug, Clone)]
pub struct StartRoute {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// First stop.
    pub from: String,
    /// Destination.
    pub to: String,
}

impl Command for StartRoute {
    fn event_name(&self) -> &'static str {
        "route-start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Move to the next stop.
#[derive(Debug, Clone)]
pub struct AdvanceRoute {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The route.
    pub route_id: Uuid,
}

/// Move to the previous stop.
#[derive(Debug, Clone)]
pub struct RetreatRoute {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The route.
    pub route_id: Uuid,
}

/// Replan from the current stop to a new destination.
#[derive(Debug, Clone)]
pub struct Reroute {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The route.
    pub route_id: Uuid,
    /// New destination.
    pub to: String,
}

/// Leave route mode.
#[derive(Debug, Clone)]
pub struct LeaveRoute {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The route.
    pub route_id: Uuid,
}

macro_rules! route_command {
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

route_command!(AdvanceRoute, "route-next");
route_command!(RetreatRoute, "route-prev");
route_command!(Reroute, "route-reroute");
route_command!(LeaveRoute, "route-leave");
