//! Voronoi cells from a Delaunay triangulation
//!
//! A site's Voronoi cell is the intersection of the half-planes bounded by
//! the perpendicular bisectors to its Delaunay neighbours. Each cell starts
//! as the clip rectangle and is cut by one bisector per neighbour.

use spade::{DelaunayTriangulation, Point2, Triangulation};
use std::collections::HashMap;
use std::time::Instant;

use super::Tessellator;
use crate::error::{GeometryError, Result};
use crate::geometry::{Bounds, Point, Polygon, EPSILON};

/// Default tessellator backed by spade
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunayTessellator;

impl Tessellator for DelaunayTessellator {
    fn clipped_cells(&self, sites: &[Point], bounds: &Bounds) -> Result<Vec<Option<Polygon>>> {
        let start = Instant::now();
        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();

        let mut handles = Vec::with_capacity(sites.len());
        for (i, site) in sites.iter().enumerate() {
            let handle = triangulation
                .insert(Point2::new(site.x, site.y))
                .map_err(|e| {
                    GeometryError::TessellationFailed(format!(
                        "cannot insert site {} at ({}, {}): {:?}",
                        i, site.x, site.y, e
                    ))
                })?;
            handles.push(handle);
        }

        // With no inner faces all sites are collinear; clipping against every
        // other site is still exact and the count is small.
        let collinear = triangulation.num_inner_faces() == 0;

        // Coincident sites share one vertex; only the first owns a cell
        let mut owners: HashMap<usize, usize> = HashMap::new();
        let mut cells = Vec::with_capacity(sites.len());

        for (i, &handle) in handles.iter().enumerate() {
            let owner = *owners.entry(handle.index()).or_insert(i);
            if owner != i {
                cells.push(None);
                continue;
            }

            let site = sites[i];
            let neighbors: Vec<Point> = if collinear {
                sites
                    .iter()
                    .copied()
                    .filter(|other| other.distance(site) > EPSILON)
                    .collect()
            } else {
                triangulation
                    .vertex(handle)
                    .out_edges()
                    .map(|edge| {
                        let p = edge.to().position();
                        Point::new(p.x, p.y)
                    })
                    .collect()
            };

            cells.push(clip_cell(site, &neighbors, bounds));
        }

        log::debug!(
            "[Tessellation] {} sites, {} cells, collinear={}, took {:?}",
            sites.len(),
            cells.iter().filter(|c| c.is_some()).count(),
            collinear,
            start.elapsed()
        );

        Ok(cells)
    }
}

/// Cut the clip rectangle by the bisector of `site` and each neighbour
fn clip_cell(site: Point, neighbors: &[Point], bounds: &Bounds) -> Option<Polygon> {
    let mut ring: Vec<Point> = bounds.corners().to_vec();

    for &neighbor in neighbors {
        let normal = neighbor - site;
        if normal.length_squared() < EPSILON * EPSILON {
            continue;
        }
        let midpoint = (site + neighbor) * 0.5;
        ring = clip_half_plane(&ring, midpoint, normal);
        if ring.len() < 3 {
            return None;
        }
    }

    Polygon::new(dedup_ring(ring))
}

/// Sutherland-Hodgman step keeping the side where `(p - origin) . normal <= 0`
fn clip_half_plane(ring: &[Point], origin: Point, normal: Point) -> Vec<Point> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let da = (a - origin).dot(normal);
        let db = (b - origin).dot(normal);
        let a_inside = da <= 0.0;
        let b_inside = db <= 0.0;

        if a_inside {
            out.push(a);
        }
        if a_inside != b_inside {
            let t = da / (da - db);
            out.push(a + (b - a) * t);
        }
    }
    out
}

/// Drop consecutive near-duplicate vertices, including across the wrap
fn dedup_ring(ring: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(ring.len());
    for p in ring {
        if out.last().map_or(true, |last| last.distance(p) > EPSILON) {
            out.push(p);
        }
    }
    while out.len() > 1 && out[0].distance(out[out.len() - 1]) <= EPSILON {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellation::clip_bounds;
    use approx::assert_relative_eq;
    use glam::DVec2;

    fn cells_for(sites: &[Point], margin: f64) -> (Vec<Option<Polygon>>, Bounds) {
        let bounds = clip_bounds(sites, margin).unwrap();
        let cells = DelaunayTessellator.clipped_cells(sites, &bounds).unwrap();
        (cells, bounds)
    }

    #[test]
    fn test_one_cell_per_site() {
        let sites = vec![
            DVec2::new(10.0, 10.0),
            DVec2::new(90.0, 10.0),
            DVec2::new(10.0, 90.0),
            DVec2::new(90.0, 90.0),
            DVec2::new(50.0, 50.0),
        ];
        let (cells, bounds) = cells_for(&sites, 50.0);
        assert_eq!(cells.len(), sites.len());

        // Cells tile the clip rectangle
        let total: f64 = cells.iter().flatten().map(|c| c.area()).sum();
        assert_relative_eq!(total, bounds.area(), epsilon = 1e-6);

        for (site, cell) in sites.iter().zip(&cells) {
            let cell = cell.as_ref().unwrap();
            assert!(cell.contains(*site));
            assert!(cell.is_counter_clockwise());
        }
    }

    #[test]
    fn test_centre_cell_is_diamond() {
        let sites = vec![
            DVec2::new(10.0, 10.0),
            DVec2::new(90.0, 10.0),
            DVec2::new(10.0, 90.0),
            DVec2::new(90.0, 90.0),
            DVec2::new(50.0, 50.0),
        ];
        let (cells, _) = cells_for(&sites, 50.0);
        let centre = cells[4].as_ref().unwrap();

        assert_eq!(centre.vertex_count(), 4);
        assert_relative_eq!(centre.area(), 3200.0, epsilon = 1e-6);
        for expected in [
            DVec2::new(50.0, 10.0),
            DVec2::new(90.0, 50.0),
            DVec2::new(50.0, 90.0),
            DVec2::new(10.0, 50.0),
        ] {
            assert!(centre.vertices().iter().any(|v| v.distance(expected) < 1e-9));
        }
    }

    #[test]
    fn test_coincident_sites_get_one_cell() {
        let sites = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(20.0, 0.0),
            DVec2::new(10.0, 15.0),
            DVec2::new(20.0, 0.0),
        ];
        let (cells, _) = cells_for(&sites, 10.0);
        assert!(cells[1].is_some());
        assert!(cells[3].is_none());
    }

    #[test]
    fn test_collinear_sites_form_strips() {
        let sites = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(20.0, 0.0),
        ];
        let (cells, bounds) = cells_for(&sites, 5.0);
        let middle = cells[1].as_ref().unwrap();
        // Strip between x = 5 and x = 15 spanning the full clip height
        assert_relative_eq!(middle.area(), 10.0 * bounds.height(), epsilon = 1e-9);
    }

    #[test]
    fn test_non_finite_site_fails() {
        let sites = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(f64::NAN, 1.0),
            DVec2::new(3.0, 4.0),
        ];
        let bounds = Bounds::new(DVec2::splat(-10.0), DVec2::splat(10.0));
        let result = DelaunayTessellator.clipped_cells(&sites, &bounds);
        assert!(matches!(result, Err(GeometryError::TessellationFailed(_))));
    }

    #[test]
    fn test_clip_half_plane() {
        let square = Bounds::new(DVec2::ZERO, DVec2::splat(10.0)).corners();
        // Keep x <= 4
        let clipped = clip_half_plane(&square, DVec2::new(4.0, 0.0), DVec2::X);
        let poly = Polygon::new(dedup_ring(clipped)).unwrap();
        assert_relative_eq!(poly.area(), 40.0);
    }
}
