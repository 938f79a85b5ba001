//! The geometry pipeline
//!
//! One run takes the sites, the optional hole position and the design
//! parameters through:
//!
//! 1. clipped Voronoi cells from the [`Tessellator`]
//! 2. interior/exterior classification against the clip box
//! 3. shrinking of interior cells by half the gap width
//! 4. silhouette reconstruction from the unshrunk interior cells
//! 5. hole placement against the unshrunk interior cells
//! 6. corner rounding of the shrunk cells, the hole and the silhouette
//!
//! A run never returns a partial result: it either succeeds or reports the
//! tessellation error, and the caller shows nothing.

use std::time::Instant;

use crate::boundary::extract_boundary;
use crate::cell::classify_cells;
use crate::config::DesignParams;
use crate::error::{GeometryError, Result};
use crate::geometry::{offset_polygon, Point, Polygon};
use crate::hole::{place_hole, Hole};
use crate::rounding::{round_shape, PathCommand};
use crate::tessellation::{clip_bounds, Tessellator};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fewer sites than this produce an empty design
pub const MIN_SITES: usize = 3;

/// How a polygon takes part in the filled design
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillRole {
    /// Counter-clockwise material
    Solid,
    /// Clockwise cut-out
    Hole,
}

/// A polygon of the final design
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePolygon {
    pub polygon: Polygon,
    pub role: FillRole,
    /// Generating site for cells, `None` for the hole
    pub site: Option<usize>,
}

/// Everything a caller needs to draw or export the design
///
/// Rebuilt from scratch on every run. `display_commands[i]` is the rounded
/// path of `final_polygons[i]` and `boundary_commands[i]` the one of
/// `boundary_polygons[i]`; an entry is empty if rounding collapsed it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryResult {
    /// Shrunk interior cells followed by the hole, if it was placed
    pub final_polygons: Vec<ShapePolygon>,
    /// Cells cut by the clip box, display only
    pub shadow_polygons: Vec<Polygon>,
    /// Outer silhouette loops of the unshrunk interior cells
    pub boundary_polygons: Vec<Polygon>,
    pub display_commands: Vec<Vec<PathCommand>>,
    pub boundary_commands: Vec<Vec<PathCommand>>,
}

impl GeometryResult {
    /// Result with no geometry at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.final_polygons.is_empty()
    }

    /// Number of material cells
    pub fn cell_count(&self) -> usize {
        self.final_polygons
            .iter()
            .filter(|s| s.role == FillRole::Solid)
            .count()
    }

    pub fn hole_included(&self) -> bool {
        self.final_polygons.iter().any(|s| s.role == FillRole::Hole)
    }

    /// Rounded path of the hole, if it was placed
    pub fn hole_commands(&self) -> Option<&[PathCommand]> {
        self.final_polygons
            .iter()
            .position(|s| s.role == FillRole::Hole)
            .and_then(|i| self.display_commands.get(i))
            .map(|c| c.as_slice())
    }

    /// Recompute only the rounded paths from the cached polygons
    ///
    /// Used when nothing but the corner radius changed.
    pub fn reround(&mut self, radius: f64) {
        self.display_commands = self
            .final_polygons
            .iter()
            .map(|s| round_shape(&s.polygon, radius))
            .collect();
        self.boundary_commands = self
            .boundary_polygons
            .iter()
            .map(|p| round_shape(p, radius))
            .collect();
    }
}

/// Run the full pipeline
///
/// # Algorithm
///
/// 1. Fewer than [`MIN_SITES`] sites short-circuit to an empty result
/// 2. Clip box = site bounding box grown by `clip_margin`
/// 3. Clipped cells from the tessellator, classified against the clip box
/// 4. Interior cells shrunk by half the gap width
/// 5. Silhouette and hole placement from the unshrunk interior cells
/// 6. Every final polygon and silhouette loop rounded by `corner_radius`
///
/// # Arguments
///
/// * `tessellator` - Source of clipped Voronoi cells
/// * `sites` - Site positions, in session order
/// * `hole` - Hole centre, if one is placed
/// * `params` - Gap width, hole size, corner radius and clip margin
///
/// # Returns
///
/// A fresh [`GeometryResult`]; shrunk cells come first, the hole last
///
/// # Errors
///
/// Returns `TessellationFailed` when the tessellator fails or returns a
/// cell list that does not match the sites
///
/// # Example
///
/// ```rust
/// use voronoi_jewelry::*;
///
/// let sites = vec![
///     Point::new(10.0, 10.0),
///     Point::new(90.0, 10.0),
///     Point::new(10.0, 90.0),
///     Point::new(90.0, 90.0),
///     Point::new(50.0, 50.0),
/// ];
/// let params = DesignParams::default();
/// let result = generate_geometry(&DelaunayTessellator, &sites, None, &params).unwrap();
///
/// assert_eq!(result.cell_count(), 1);
/// assert_eq!(result.shadow_polygons.len(), 4);
/// ```
pub fn generate_geometry<T>(
    tessellator: &T,
    sites: &[Point],
    hole: Option<Point>,
    params: &DesignParams,
) -> Result<GeometryResult>
where
    T: Tessellator + ?Sized,
{
    if sites.len() < MIN_SITES {
        log::debug!(
            "[Pipeline] {} sites, need at least {}; empty design",
            sites.len(),
            MIN_SITES
        );
        return Ok(GeometryResult::empty());
    }

    let total_start = Instant::now();

    let bounds = clip_bounds(sites, params.clip_margin)
        .ok_or_else(|| GeometryError::TessellationFailed("no sites to bound".into()))?;

    let tess_start = Instant::now();
    let cells = tessellator.clipped_cells(sites, &bounds)?;
    let tess_time = tess_start.elapsed();
    if cells.len() != sites.len() {
        return Err(GeometryError::TessellationFailed(format!(
            "expected {} cells, got {}",
            sites.len(),
            cells.len()
        )));
    }

    let classified = classify_cells(sites, cells, &bounds);
    let originals = classified.interior_polygons();

    let mut final_polygons: Vec<ShapePolygon> = classified
        .interior
        .iter()
        .filter_map(|cell| match offset_polygon(&cell.polygon, params.shrink_distance()) {
            Some(polygon) => Some(ShapePolygon {
                polygon,
                role: FillRole::Solid,
                site: Some(cell.site),
            }),
            None => {
                log::debug!("[Pipeline] cell of site {} collapsed when shrunk", cell.site);
                None
            }
        })
        .collect();

    let boundary_start = Instant::now();
    let boundary_polygons = extract_boundary(&originals);
    let boundary_time = boundary_start.elapsed();

    if let Some(center) = hole {
        let hole = Hole::new(center, params.hole_diameter);
        match place_hole(&hole, &originals, params.hole_segments) {
            Some(placed) => final_polygons.push(ShapePolygon {
                polygon: placed.polygon,
                role: FillRole::Hole,
                site: None,
            }),
            None => log::debug!(
                "[Pipeline] hole at ({:.2}, {:.2}) is outside every interior cell",
                center.x,
                center.y
            ),
        }
    }

    let mut result = GeometryResult {
        final_polygons,
        shadow_polygons: classified.exterior.into_iter().map(|c| c.polygon).collect(),
        boundary_polygons,
        display_commands: Vec::new(),
        boundary_commands: Vec::new(),
    };
    result.reround(params.corner_radius);

    log::debug!(
        "[Pipeline] {} sites: {} interior, {} shadow, {} boundary loops, hole={}; tessellation={:?}, boundary={:?}, total={:?}",
        sites.len(),
        result.cell_count(),
        result.shadow_polygons.len(),
        result.boundary_polygons.len(),
        result.hole_included(),
        tess_time,
        boundary_time,
        total_start.elapsed()
    );

    Ok(result)
}
