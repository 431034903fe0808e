//! Driver rating updates.
//!
//! Each input pulls the stored rating a fixed fraction toward it, so the
//! rating is an exponential moving average of the inputs, bounded to the
//! five-star scale.

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Fraction of the gap to the input closed per update.
pub const RATING_SMOOTHING: f64 = 0.1;

pub fn blend_rating(current: f64, input: f64) -> f64 {
    (current + (input - current) * RATING_SMOOTHING).clamp(MIN_RATING, MAX_RATING)
}
