//! Scenario fixtures and engine construction.
//!
//! Driver, car, and location records arrive from external structured data;
//! this module only defines the shapes and wires them into an engine. File
//! I/O stays with the caller.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::clock::WallClock;
use crate::ecs::DriverId;
use crate::engine::DispatchEngine;
use crate::error::DispatchError;
use crate::fleet::Car;
use crate::matching::AssignmentStrategy;
use crate::spatial::{GridPoint, Location, LocationId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverFixture {
    pub id: DriverId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub drivers: Vec<DriverFixture>,
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl Scenario {
    /// Builds an engine and registers every fixture. Fails on duplicate
    /// driver ids, leaving nothing half-registered for the caller to keep.
    pub fn build(
        self,
        strategy: Box<dyn AssignmentStrategy>,
        clock: WallClock,
    ) -> Result<DispatchEngine, DispatchError> {
        let mut engine = DispatchEngine::new(strategy, clock);
        for driver in self.drivers {
            engine.add_driver(
                driver.id,
                driver.name,
                GridPoint::new(driver.x, driver.y),
                driver.rating,
            )?;
        }
        for car in self.cars {
            engine.add_car(car);
        }
        Ok(engine)
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.name == name)
    }

    /// Seeded generator for load tests, benches, and demo runs. The same
    /// seed always yields the same fixtures.
    pub fn random(seed: u64, drivers: usize, locations: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let drivers = (0..drivers)
            .map(|i| DriverFixture {
                id: DriverId(i as u32 + 1),
                name: format!("driver-{}", i + 1),
                x: rng.gen_range(0.0..50.0),
                y: rng.gen_range(0.0..50.0),
                rating: rng.gen_range(2.5..5.0),
            })
            .collect();
        let locations = (0..locations)
            .map(|i| Location {
                id: LocationId(i as u32 + 1),
                name: format!("stop-{}", i + 1),
                point: GridPoint::new(rng.gen_range(0.0..50.0), rng.gen_range(0.0..50.0)),
            })
            .collect();
        Self {
            drivers,
            cars: Vec::new(),
            locations,
        }
    }
}
