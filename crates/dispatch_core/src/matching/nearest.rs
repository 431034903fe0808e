use crate::ecs::DriverId;
use crate::spatial::manhattan_distance;

use super::strategy::AssignmentStrategy;
use super::types::{DriverCandidate, RideContext};

/// Peak-hour strategy: minimize Manhattan distance to the pickup, nothing
/// else. Ties go to the first candidate achieving the minimum, in the stable
/// order of the candidate slice.
#[derive(Debug, Default)]
pub struct NearestDriver;

impl AssignmentStrategy for NearestDriver {
    fn select(
        &self,
        ctx: &RideContext,
        candidates: &[DriverCandidate],
        _now_minutes: u32,
    ) -> Option<DriverId> {
        let mut best: Option<(DriverId, f64)> = None;

        for candidate in candidates {
            let distance = manhattan_distance(candidate.position, ctx.pickup);
            match best {
                None => best = Some((candidate.id, distance)),
                Some((_, best_distance)) if distance < best_distance => {
                    best = Some((candidate.id, distance))
                }
                _ => {}
            }
        }

        best.map(|(id, _)| id)
    }
}
