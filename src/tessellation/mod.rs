//! Clipped Voronoi tessellation
//!
//! The pipeline only needs one capability from a Voronoi library: given the
//! sites and a clip rectangle, return each site's cell clipped to that
//! rectangle. [`Tessellator`] is that seam; [`DelaunayTessellator`] is the
//! default implementation backed by spade's Delaunay triangulation.

mod delaunay;

pub use delaunay::DelaunayTessellator;

use crate::error::Result;
use crate::geometry::{Bounds, Point, Polygon};

/// Source of clipped Voronoi cells
///
/// Implementations must return exactly one entry per site, in site order.
/// An entry is `None` when the site has no usable cell (for example a site
/// coinciding with an earlier one).
pub trait Tessellator {
    /// Compute every site's Voronoi cell clipped to `bounds`
    ///
    /// # Errors
    ///
    /// Returns `TessellationFailed` when the sites cannot be triangulated
    /// (non-finite or out-of-range coordinates)
    fn clipped_cells(&self, sites: &[Point], bounds: &Bounds) -> Result<Vec<Option<Polygon>>>;
}

/// Clip rectangle for a set of sites: their bounding box grown by `margin`
///
/// The margin pushes the infinite edges of hull cells far enough out that
/// cells of interior sites never reach the rectangle.
pub fn clip_bounds(sites: &[Point], margin: f64) -> Option<Bounds> {
    Bounds::from_points(sites.iter().copied()).map(|b| b.inflate(margin))
}
