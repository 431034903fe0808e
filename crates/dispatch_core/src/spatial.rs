//! Plane geometry for the dispatch grid.
//!
//! Driver positions and locations are a single `(x, y)` snapshot; matching
//! uses the Manhattan metric, pricing the Euclidean one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point on the dispatch grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

impl GridPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u32);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable named coordinate, as loaded from fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub point: GridPoint,
}

/// `|dx| + |dy|`, the metric the assignment strategies rank drivers by.
pub fn manhattan_distance(a: GridPoint, b: GridPoint) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Straight-line distance, used for fares.
pub fn euclidean_distance(a: GridPoint, b: GridPoint) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
