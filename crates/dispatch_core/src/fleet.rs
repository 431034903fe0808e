//! Fleet inventory.
//!
//! Car records are tracked for ownership reporting and never consulted by
//! matching; assignment is a driver-level decision.

use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarId(pub u32);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub model: String,
    pub license_plate: String,
    pub available: bool,
}

#[derive(Debug, Default, Resource)]
pub struct Fleet {
    cars: Vec<Car>,
}

impl Fleet {
    pub fn register(&mut self, car: Car) {
        self.cars.push(car);
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}
