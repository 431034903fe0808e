#![allow(dead_code)]

use dispatch_core::clock::{FixedTime, WallClock};
use dispatch_core::ecs::{ClientId, DriverId};
use dispatch_core::engine::{DispatchEngine, RideReceipt};
use dispatch_core::matching::PeakHourPolicy;
use dispatch_core::pending::ReconcilePolicy;
use dispatch_core::spatial::{GridPoint, Location, LocationId};

/// Builder that assembles an engine with a pinned clock and simple fixtures,
/// so every test controls peak/off-peak behavior explicitly.
pub struct TestEngineBuilder {
    clock: FixedTime,
    policy: ReconcilePolicy,
    drivers: Vec<(DriverId, GridPoint, f64)>,
}

impl TestEngineBuilder {
    /// Defaults to noon (off peak) and the single-pass queue drop.
    pub fn new() -> Self {
        Self {
            clock: FixedTime::at(12, 0),
            policy: ReconcilePolicy::default(),
            drivers: Vec::new(),
        }
    }

    pub fn at_time(mut self, hour: u32, minute: u32) -> Self {
        self.clock = FixedTime::at(hour, minute);
        self
    }

    pub fn reconcile_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn driver(mut self, id: u32, x: f64, y: f64, rating: f64) -> Self {
        self.drivers.push((DriverId(id), GridPoint::new(x, y), rating));
        self
    }

    pub fn build(self) -> DispatchEngine {
        let mut engine = DispatchEngine::new(
            Box::new(PeakHourPolicy::default()),
            WallClock::new(Box::new(self.clock)),
        );
        engine.set_reconcile_policy(self.policy);
        for (id, position, rating) in self.drivers {
            engine
                .add_driver(id, format!("driver-{id}"), position, rating)
                .expect("unique driver id");
        }
        engine
    }
}

impl Default for TestEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A named stop at the given coordinates.
pub fn stop(id: u32, name: &str, x: f64, y: f64) -> Location {
    Location {
        id: LocationId(id),
        name: name.to_string(),
        point: GridPoint::new(x, y),
    }
}

/// Requests a ride between two fresh stops with a neutral client rating.
pub fn request(
    engine: &mut DispatchEngine,
    client: u32,
    pickup: (f64, f64),
    destination: (f64, f64),
) -> RideReceipt {
    engine.request_ride(
        ClientId(client),
        stop(1000 + client, "pickup", pickup.0, pickup.1),
        stop(2000 + client, "destination", destination.0, destination.1),
        4.0,
    )
}
