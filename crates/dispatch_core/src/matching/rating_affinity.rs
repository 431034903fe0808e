use crate::ecs::DriverId;
use crate::spatial::manhattan_distance;

use super::strategy::AssignmentStrategy;
use super::types::{DriverCandidate, RideContext};

/// Off-peak strategy: minimize `distance * |driver.rating - client_rating|`.
///
/// A perfect rating match zeroes the multiplier and makes distance
/// irrelevant. That asymmetry against the peak policy is intentional: off
/// peak there is slack to route a well-matched driver across town.
#[derive(Debug, Default)]
pub struct RatingAffinity;

impl RatingAffinity {
    fn score(ctx: &RideContext, candidate: &DriverCandidate) -> f64 {
        let distance = manhattan_distance(candidate.position, ctx.pickup);
        distance * (candidate.rating - ctx.client_rating).abs()
    }
}

impl AssignmentStrategy for RatingAffinity {
    fn select(
        &self,
        ctx: &RideContext,
        candidates: &[DriverCandidate],
        _now_minutes: u32,
    ) -> Option<DriverId> {
        let mut best: Option<(DriverId, f64)> = None;

        for candidate in candidates {
            let score = Self::score(ctx, candidate);
            match best {
                None => best = Some((candidate.id, score)),
                Some((_, best_score)) if score < best_score => {
                    best = Some((candidate.id, score))
                }
                _ => {}
            }
        }

        best.map(|(id, _)| id)
    }
}
