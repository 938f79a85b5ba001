//! Quantized point and segment keys
//!
//! Neighbouring cells compute their shared edge independently, so the two
//! copies differ by floating-point noise. Coordinates are rounded to a fixed
//! number of decimals before comparison.

use super::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scale applied before rounding (four decimal places)
pub const KEY_PRECISION: f64 = 1e4;

/// A point rounded to [`KEY_PRECISION`]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey {
    x: i64,
    y: i64,
}

impl PointKey {
    pub fn new(point: Point) -> Self {
        Self {
            x: (point.x * KEY_PRECISION).round() as i64,
            y: (point.y * KEY_PRECISION).round() as i64,
        }
    }
}

impl From<Point> for PointKey {
    fn from(point: Point) -> Self {
        Self::new(point)
    }
}

/// Undirected segment key; endpoints are stored sorted by x, then y
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    start: PointKey,
    end: PointKey,
}

impl SegmentKey {
    pub fn new(a: Point, b: Point) -> Self {
        Self::from_keys(PointKey::new(a), PointKey::new(b))
    }

    pub fn from_keys(a: PointKey, b: PointKey) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    #[inline]
    pub fn endpoints(&self) -> (PointKey, PointKey) {
        (self.start, self.end)
    }

    /// Both endpoints round to the same key
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}
