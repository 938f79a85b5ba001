//! Outer silhouette of the interior cells
//!
//! Interior cells tile their union without gaps, so an edge shared by two
//! cells is counted twice and an edge on the silhouette exactly once. The
//! singly-used edges are then chained back into closed loops by walking
//! shared endpoints.
//!
//! Edges are matched through [`SegmentKey`]s, so edges computed separately
//! by two neighbouring cells still pair up despite rounding noise.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::geometry::{Point, PointKey, Polygon, SegmentKey};

/// How often an undirected edge occurs across all cells
#[derive(Debug, Clone, Copy)]
struct EdgeTally {
    start: Point,
    end: Point,
    count: usize,
}

/// Count every edge of every cell, in first-seen order
fn tally_edges(cells: &[Polygon]) -> IndexMap<SegmentKey, EdgeTally> {
    let mut tally: IndexMap<SegmentKey, EdgeTally> = IndexMap::new();
    for cell in cells {
        for (a, b) in cell.edges() {
            let key = SegmentKey::new(a, b);
            if key.is_degenerate() {
                continue;
            }
            tally
                .entry(key)
                .and_modify(|t| t.count += 1)
                .or_insert(EdgeTally {
                    start: a,
                    end: b,
                    count: 1,
                });
        }
    }
    tally
}

/// Edges used by exactly one cell
///
/// Edges used more than twice cannot occur in a planar tiling; they point
/// at key collisions and are dropped like shared edges, with a warning.
pub fn exterior_segments(cells: &[Polygon]) -> Vec<(Point, Point)> {
    let tally = tally_edges(cells);
    let overused = tally.values().filter(|t| t.count > 2).count();
    if overused > 0 {
        log::warn!(
            "[Boundary] {} edges used by more than two cells; treating them as internal",
            overused
        );
    }
    tally
        .values()
        .filter(|t| t.count == 1)
        .map(|t| (t.start, t.end))
        .collect()
}

/// Rebuild the closed silhouette loops of a set of interior cells
///
/// Usually one loop; disconnected groups of cells give one loop each.
/// Loops are returned counter-clockwise.
///
/// # Algorithm
///
/// 1. Tally every undirected edge by its quantized [`SegmentKey`]
/// 2. Keep the edges used by exactly one cell
/// 3. Walk the kept edges end to end until each walk returns to its start
///
/// # Arguments
///
/// * `cells` - Unshrunk interior cells, which tile their union exactly
///
/// # Returns
///
/// One polygon per closed loop; empty when `cells` is empty
pub fn extract_boundary(cells: &[Polygon]) -> Vec<Polygon> {
    let segments = exterior_segments(cells);
    reconstruct_loops(&segments)
}

/// Chain segments into loops by matching endpoint keys
///
/// A walk that runs out of segments before returning to its start is a
/// reconstruction anomaly: it is logged and kept as an open polygon if it
/// has at least three points, otherwise dropped.
pub(crate) fn reconstruct_loops(segments: &[(Point, Point)]) -> Vec<Polygon> {
    let mut adjacency: HashMap<PointKey, Vec<usize>> = HashMap::new();
    for (i, &(a, b)) in segments.iter().enumerate() {
        adjacency.entry(PointKey::new(a)).or_default().push(i);
        adjacency.entry(PointKey::new(b)).or_default().push(i);
    }

    let mut consumed = vec![false; segments.len()];
    let max_steps = segments.len() * 2 + 4;
    let mut steps = 0;
    let mut loops = Vec::new();

    for seed in 0..segments.len() {
        if consumed[seed] {
            continue;
        }
        consumed[seed] = true;

        let (a, b) = segments[seed];
        let start_key = PointKey::new(a);
        let mut tail_key = PointKey::new(b);
        let mut path = vec![a, b];
        let mut closed = false;

        loop {
            if tail_key == start_key {
                // The closing point duplicates the start
                path.pop();
                closed = true;
                break;
            }

            steps += 1;
            if steps > max_steps {
                log::warn!(
                    "[Boundary] step cap of {} reached, abandoning path of {} points",
                    max_steps,
                    path.len()
                );
                break;
            }

            let next = adjacency
                .get(&tail_key)
                .and_then(|ids| ids.iter().copied().find(|&id| !consumed[id]));
            let Some(id) = next else {
                log::warn!("[Boundary] dead end after {} points", path.len());
                break;
            };
            consumed[id] = true;

            let (p, q) = segments[id];
            let other = if PointKey::new(p) == tail_key { q } else { p };
            tail_key = PointKey::new(other);
            path.push(other);
        }

        if !closed {
            log::debug!("[Boundary] keeping open path of {} points", path.len());
        }

        if let Some(polygon) = Polygon::new(path) {
            if polygon.is_counter_clockwise() {
                loops.push(polygon);
            } else {
                loops.push(polygon.reversed());
            }
        }
    }

    loops
}
