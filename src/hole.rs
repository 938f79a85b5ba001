//! Mounting hole placement
//!
//! The hole is a circle approximated by a polygon and wound clockwise, so
//! filling the design with the even-odd rule punches it out of the cell it
//! sits in. Containment is tested against the unshrunk interior cells; the
//! gap must not push a hole near a cell edge out of the design.

use crate::geometry::{Point, Polygon};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A circular cut-out
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    pub center: Point,
    pub diameter: f64,
}

impl Hole {
    pub fn new(center: Point, diameter: f64) -> Self {
        Self { center, diameter }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Clockwise polygon of the hole outline
    pub fn polygon(&self, segments: usize) -> Option<Polygon> {
        Polygon::circle(self.center, self.radius(), segments).map(|c| c.reversed())
    }
}

/// A hole that landed inside the design
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedHole {
    /// Index into the interior cell list that contains the centre
    pub cell: usize,
    /// Clockwise hole outline
    pub polygon: Polygon,
}

/// Find the first interior cell containing the hole centre
///
/// Only one hole is ever produced, even when the centre sits on an edge
/// shared by two cells.
pub fn place_hole(hole: &Hole, interior_cells: &[Polygon], segments: usize) -> Option<PlacedHole> {
    let cell = interior_cells
        .iter()
        .position(|cell| cell.contains(hole.center))?;
    let polygon = hole.polygon(segments)?;
    Some(PlacedHole { cell, polygon })
}
