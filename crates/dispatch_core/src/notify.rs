//! Point notification of matched drivers.
//!
//! The strategy has already chosen the driver when a notice fires; delivery
//! is purely informational and has no effect on the assignment. Sinks are
//! plain capabilities keyed by driver id; drivers hold no references into
//! engine internals.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;

use crate::ecs::{DriverId, OrderId};
use crate::spatial::Location;

/// Details delivered to the selected driver once a match has committed.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchNotice {
    pub order: OrderId,
    pub pickup: Location,
    pub destination: Location,
    pub price: f64,
}

/// Callback surface a driver-facing integration hands to the engine.
pub trait NotificationSink: Send + Sync {
    fn on_matched(&mut self, notice: &MatchNotice);
}

/// Registry of notification sinks keyed by driver id.
#[derive(Default, Resource)]
pub struct NotifierRegistry {
    sinks: HashMap<DriverId, Box<dyn NotificationSink>>,
}

impl NotifierRegistry {
    pub fn attach(&mut self, driver: DriverId, sink: Box<dyn NotificationSink>) {
        self.sinks.insert(driver, sink);
    }

    pub fn detach(&mut self, driver: DriverId) -> Option<Box<dyn NotificationSink>> {
        self.sinks.remove(&driver)
    }

    pub fn is_attached(&self, driver: DriverId) -> bool {
        self.sinks.contains_key(&driver)
    }

    /// Delivers to exactly the selected driver, if a sink is attached.
    pub fn notify(&mut self, driver: DriverId, notice: &MatchNotice) {
        if let Some(sink) = self.sinks.get_mut(&driver) {
            sink.on_matched(notice);
        }
    }
}
