//! Clipped Voronoi cells and boundedness classification
//!
//! A cell whose polygon reaches the clip rectangle is really unbounded: the
//! rectangle cut it off. Such cells are kept only as display "shadow" and
//! take no part in shrinking, boundary extraction or hole placement.

use crate::geometry::{Bounds, Point, Polygon, EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance from the clip rectangle under which a vertex counts as touching
///
/// Much looser than [`EPSILON`] because clipping introduces its own error.
pub const BOUNDS_TOLERANCE: f64 = EPSILON * 100.0;

/// Whether a cell is a real finite region or was cut by the clip box
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// No vertex touches the clip rectangle
    Interior,
    /// At least one vertex lies on the clip rectangle
    Exterior,
}

/// A site's clipped Voronoi cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of the generating site in the session's site list
    pub site: usize,
    /// Position of the generating site
    pub seed: Point,
    /// Cell polygon as produced by the tessellator
    pub polygon: Polygon,
    pub kind: CellKind,
}

impl VoronoiCell {
    /// Build a cell and classify it against the clip rectangle
    pub fn new(site: usize, seed: Point, polygon: Polygon, bounds: &Bounds) -> Self {
        let kind = classify_polygon(&polygon, bounds);
        Self {
            site,
            seed,
            polygon,
            kind,
        }
    }

    #[inline]
    pub fn is_interior(&self) -> bool {
        self.kind == CellKind::Interior
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.polygon.vertex_count()
    }
}

/// Interior cells touch none of the four clip edges
pub fn classify_polygon(polygon: &Polygon, bounds: &Bounds) -> CellKind {
    if polygon
        .vertices()
        .iter()
        .any(|&v| bounds.touches(v, BOUNDS_TOLERANCE))
    {
        CellKind::Exterior
    } else {
        CellKind::Interior
    }
}

/// Cells split by kind, each list in site order
#[derive(Debug, Clone, Default)]
pub struct ClassifiedCells {
    pub interior: Vec<VoronoiCell>,
    pub exterior: Vec<VoronoiCell>,
}

impl ClassifiedCells {
    pub fn interior_polygons(&self) -> Vec<Polygon> {
        self.interior.iter().map(|c| c.polygon.clone()).collect()
    }
}

/// Classify the tessellator's output; sites without a cell are skipped
pub fn classify_cells(
    sites: &[Point],
    cells: Vec<Option<Polygon>>,
    bounds: &Bounds,
) -> ClassifiedCells {
    let mut classified = ClassifiedCells::default();
    for (site, cell) in cells.into_iter().enumerate() {
        let Some(polygon) = cell else {
            log::debug!("[Classify] site {} has no cell", site);
            continue;
        };
        let seed = sites.get(site).copied().unwrap_or_else(|| polygon.centroid());
        let cell = VoronoiCell::new(site, seed, polygon, bounds);
        match cell.kind {
            CellKind::Interior => classified.interior.push(cell),
            CellKind::Exterior => classified.exterior.push(cell),
        }
    }
    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn bounds() -> Bounds {
        Bounds::new(DVec2::new(-40.0, -40.0), DVec2::new(140.0, 140.0))
    }

    fn poly(points: &[(f64, f64)]) -> Polygon {
        Polygon::new(points.iter().map(|&(x, y)| DVec2::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn test_interior_cell() {
        let diamond = poly(&[(50.0, 10.0), (90.0, 50.0), (50.0, 90.0), (10.0, 50.0)]);
        assert_eq!(classify_polygon(&diamond, &bounds()), CellKind::Interior);
    }

    #[test]
    fn test_cell_touching_any_edge_is_exterior() {
        let b = bounds();
        for touching in [
            poly(&[(-40.0, 0.0), (0.0, 0.0), (0.0, 10.0)]),
            poly(&[(140.0, 0.0), (100.0, 0.0), (100.0, 10.0)]),
            poly(&[(0.0, -40.0), (10.0, 0.0), (0.0, 10.0)]),
            poly(&[(0.0, 140.0), (10.0, 100.0), (0.0, 100.0)]),
        ] {
            assert_eq!(classify_polygon(&touching, &b), CellKind::Exterior);
        }
    }

    #[test]
    fn test_tolerance_absorbs_clipping_noise() {
        let b = bounds();
        let almost = poly(&[(-40.0 + 5e-4, 0.0), (0.0, 0.0), (0.0, 10.0)]);
        assert_eq!(classify_polygon(&almost, &b), CellKind::Exterior);

        let clear = poly(&[(-40.0 + 5e-3, 0.0), (0.0, 0.0), (0.0, 10.0)]);
        assert_eq!(classify_polygon(&clear, &b), CellKind::Interior);
    }

    #[test]
    fn test_classify_cells_keeps_site_order_and_skips_missing() {
        let sites = vec![DVec2::ZERO, DVec2::new(50.0, 50.0), DVec2::new(1.0, 1.0)];
        let cells = vec![
            Some(poly(&[(-40.0, -40.0), (0.0, -40.0), (0.0, 0.0)])),
            Some(poly(&[(50.0, 10.0), (90.0, 50.0), (50.0, 90.0), (10.0, 50.0)])),
            None,
        ];
        let classified = classify_cells(&sites, cells, &bounds());

        assert_eq!(classified.interior.len(), 1);
        assert_eq!(classified.exterior.len(), 1);
        assert_eq!(classified.interior[0].site, 1);
        assert_eq!(classified.interior[0].seed, DVec2::new(50.0, 50.0));
        assert!(classified.interior[0].is_interior());
        assert_eq!(classified.exterior[0].site, 0);
        assert_eq!(classified.interior_polygons().len(), 1);
    }
}
