use crate::clock::is_peak;
use crate::ecs::DriverId;

use super::nearest::NearestDriver;
use super::rating_affinity::RatingAffinity;
use super::strategy::AssignmentStrategy;
use super::types::{DriverCandidate, RideContext};

/// Time-of-day dispatcher over two strategies: raw proximity during peak
/// windows, rating affinity off peak.
pub struct PeakHourPolicy {
    peak: Box<dyn AssignmentStrategy>,
    off_peak: Box<dyn AssignmentStrategy>,
}

impl PeakHourPolicy {
    pub fn new(peak: Box<dyn AssignmentStrategy>, off_peak: Box<dyn AssignmentStrategy>) -> Self {
        Self { peak, off_peak }
    }
}

impl Default for PeakHourPolicy {
    fn default() -> Self {
        Self::new(Box::new(NearestDriver), Box::new(RatingAffinity))
    }
}

impl AssignmentStrategy for PeakHourPolicy {
    fn select(
        &self,
        ctx: &RideContext,
        candidates: &[DriverCandidate],
        now_minutes: u32,
    ) -> Option<DriverId> {
        if is_peak(now_minutes) {
            self.peak.select(ctx, candidates, now_minutes)
        } else {
            self.off_peak.select(ctx, candidates, now_minutes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedTime;
    use crate::spatial::GridPoint;

    fn ctx() -> RideContext {
        RideContext {
            pickup: GridPoint::new(0.0, 0.0),
            client_rating: 5.0,
        }
    }

    /// Near driver with a poor rating fit; far driver with a perfect one.
    fn candidates() -> [DriverCandidate; 2] {
        [
            DriverCandidate {
                id: DriverId(1),
                position: GridPoint::new(1.0, 0.0),
                rating: 3.0,
            },
            DriverCandidate {
                id: DriverId(2),
                position: GridPoint::new(5.0, 0.0),
                rating: 5.0,
            },
        ]
    }

    #[test]
    fn peak_minimizes_distance_alone() {
        let policy = PeakHourPolicy::default();
        let at = FixedTime::at(8, 30).0;
        assert_eq!(policy.select(&ctx(), &candidates(), at), Some(DriverId(1)));
    }

    #[test]
    fn off_peak_prefers_the_rating_match() {
        let policy = PeakHourPolicy::default();
        let at = FixedTime::at(12, 0).0;
        assert_eq!(policy.select(&ctx(), &candidates(), at), Some(DriverId(2)));
    }

    #[test]
    fn window_edges_still_count_as_peak() {
        let policy = PeakHourPolicy::default();
        assert_eq!(
            policy.select(&ctx(), &candidates(), FixedTime::at(10, 0).0),
            Some(DriverId(1))
        );
        assert_eq!(
            policy.select(&ctx(), &candidates(), FixedTime::at(10, 1).0),
            Some(DriverId(2))
        );
    }
}
