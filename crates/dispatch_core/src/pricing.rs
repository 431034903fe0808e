//! Fare calculation for dispatch orders.

use crate::spatial::{euclidean_distance, GridPoint};

/// Per-distance-unit rate in currency units.
pub const FARE_PER_UNIT: f64 = 0.5;

/// Fare for a trip: straight-line pickup-to-destination distance times the
/// rate, rounded up to a whole currency unit.
///
/// Computed once, at the moment an order is assigned; never recalculated.
pub fn trip_fare(pickup: GridPoint, destination: GridPoint) -> f64 {
    (euclidean_distance(pickup, destination) * FARE_PER_UNIT).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fare_rounds_distance_charge_up() {
        let pickup = GridPoint::new(0.0, 0.0);
        let destination = GridPoint::new(3.0, 4.0);
        // distance 5.0, charge 2.5, rounded up
        assert_eq!(trip_fare(pickup, destination), 3.0);
    }

    #[test]
    fn zero_length_trip_is_free() {
        let p = GridPoint::new(2.0, 2.0);
        assert_eq!(trip_fare(p, p), 0.0);
    }

    #[test]
    fn fare_is_deterministic_for_equal_coordinates() {
        let a = GridPoint::new(1.5, -2.0);
        let b = GridPoint::new(10.0, 6.5);
        let first = trip_fare(a, b);
        for _ in 0..10 {
            assert_eq!(trip_fare(a, b), first);
        }
    }
}
