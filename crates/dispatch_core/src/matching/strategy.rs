use crate::ecs::DriverId;

use super::types::{DriverCandidate, RideContext};

/// Trait for driver-selection strategies.
///
/// Implementations are pure decision functions: they see only the candidate
/// slice handed to them and never touch engine state. An empty slice yields
/// `None`. `now_minutes` is minutes past midnight, supplied by the engine's
/// clock so time-of-day policies stay deterministic in tests.
pub trait AssignmentStrategy: Send + Sync {
    fn select(
        &self,
        ctx: &RideContext,
        candidates: &[DriverCandidate],
        now_minutes: u32,
    ) -> Option<DriverId>;
}
