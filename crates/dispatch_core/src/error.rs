use std::fmt;

use crate::ecs::{DriverId, OrderId};

/// Failures that reference records the engine does not know about.
///
/// State-mismatch conditions (completing a pending order, assigning a busy
/// driver) are not errors; they surface as [crate::engine::Outcome::Rejected]
/// with the engine state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    UnknownOrder(OrderId),
    UnknownDriver(DriverId),
    DuplicateDriver(DriverId),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownOrder(id) => write!(f, "order {id} does not exist"),
            DispatchError::UnknownDriver(id) => write!(f, "driver {id} does not exist"),
            DispatchError::DuplicateDriver(id) => {
                write!(f, "driver {id} is already registered")
            }
        }
    }
}

impl std::error::Error for DispatchError {}
