use crate::ecs::DriverId;
use crate::spatial::GridPoint;

/// One available driver offered to the strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverCandidate {
    pub id: DriverId,
    pub position: GridPoint,
    pub rating: f64,
}

/// The ride a strategy is selecting a driver for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideContext {
    pub pickup: GridPoint,
    pub client_rating: f64,
}
