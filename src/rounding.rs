//! Corner rounding into drawable path commands
//!
//! Each corner is replaced by a quadratic Bezier whose control point is the
//! corner itself and whose ends are the tangent points `radius` away along
//! both adjacent edges. The radius is clamped per corner to half the
//! shorter adjacent edge, so two neighbouring roundings can meet but never
//! overlap.

use crate::geometry::{Point, Polygon, EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Edges shorter than this keep both of their corners sharp
pub const MIN_ROUNDING_EDGE: f64 = 1e-3;

/// One drawing command of a closed path
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    Close,
}

impl PathCommand {
    /// Point the pen ends on, `None` for `Close`
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
            PathCommand::QuadTo { to, .. } => Some(to),
            PathCommand::Close => None,
        }
    }

    /// Every coordinate the command mentions, control points included
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (a, b) = match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => (Some(p), None),
            PathCommand::QuadTo { control, to } => (Some(control), Some(to)),
            PathCommand::Close => (None, None),
        };
        a.into_iter().chain(b)
    }
}

#[derive(Debug, Clone, Copy)]
enum Corner {
    Sharp(Point),
    Rounded { enter: Point, control: Point, exit: Point },
}

impl Corner {
    fn exit(&self) -> Point {
        match *self {
            Corner::Sharp(p) => p,
            Corner::Rounded { exit, .. } => exit,
        }
    }
}

/// Round every corner of a closed vertex ring
///
/// Returns an empty list when fewer than three distinct vertices remain
/// after collapsing consecutive duplicates. Otherwise the list starts with
/// a single `MoveTo`, ends with `Close`, and every other command continues
/// from the previous end point.
///
/// # Algorithm
///
/// For each corner the radius is clamped to half the shorter adjacent edge.
/// The corner becomes a quadratic curve from the tangent point on the
/// incoming edge, through the corner as control point, to the tangent
/// point on the outgoing edge. Corners next to an edge shorter than
/// [`MIN_ROUNDING_EDGE`] stay sharp. The path starts at the exit of the
/// last corner so that `Close` runs straight into the first one.
///
/// # Arguments
///
/// * `vertices` - Closed ring, with or without a repeated first point
/// * `radius` - Requested corner radius; below `EPSILON` gives sharp corners
pub fn round_polygon(vertices: &[Point], radius: f64) -> Vec<PathCommand> {
    let ring = dedup_closed(vertices);
    if ring.len() < 3 {
        return Vec::new();
    }
    if radius < EPSILON {
        return sharp_path(&ring);
    }

    let n = ring.len();
    let corners: Vec<Corner> = (0..n)
        .map(|i| corner(ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n], radius))
        .collect();

    // Start where the last corner's rounding ends, so closing the path
    // flows straight into the first corner.
    let start = corners[n - 1].exit();
    let mut commands = Vec::with_capacity(2 * n + 2);
    commands.push(PathCommand::MoveTo(start));
    let mut pen = start;

    for c in &corners {
        match *c {
            Corner::Sharp(p) => {
                if pen.distance(p) > EPSILON {
                    commands.push(PathCommand::LineTo(p));
                    pen = p;
                }
            }
            Corner::Rounded {
                enter,
                control,
                exit,
            } => {
                if pen.distance(enter) > EPSILON {
                    commands.push(PathCommand::LineTo(enter));
                }
                commands.push(PathCommand::QuadTo { control, to: exit });
                pen = exit;
            }
        }
    }

    commands.push(PathCommand::Close);
    commands
}

/// Round a polygon, see [`round_polygon`]
pub fn round_shape(polygon: &Polygon, radius: f64) -> Vec<PathCommand> {
    round_polygon(polygon.vertices(), radius)
}

fn corner(prev: Point, at: Point, next: Point, radius: f64) -> Corner {
    let incoming = at - prev;
    let outgoing = next - at;
    let len_in = incoming.length();
    let len_out = outgoing.length();

    if len_in < MIN_ROUNDING_EDGE || len_out < MIN_ROUNDING_EDGE {
        return Corner::Sharp(at);
    }

    let actual = radius.clamp(0.0, len_in.min(len_out) / 2.0);
    if actual < EPSILON {
        return Corner::Sharp(at);
    }

    Corner::Rounded {
        enter: at - incoming / len_in * actual,
        control: at,
        exit: at + outgoing / len_out * actual,
    }
}

fn sharp_path(ring: &[Point]) -> Vec<PathCommand> {
    let mut commands = Vec::with_capacity(ring.len() + 1);
    commands.push(PathCommand::MoveTo(ring[0]));
    commands.extend(ring[1..].iter().map(|&p| PathCommand::LineTo(p)));
    commands.push(PathCommand::Close);
    commands
}

/// Drop consecutive duplicates, including a trailing copy of the first point
fn dedup_closed(vertices: &[Point]) -> Vec<Point> {
    let mut ring: Vec<Point> = Vec::with_capacity(vertices.len());
    for &p in vertices {
        if ring.last().map_or(true, |last| last.distance(p) > EPSILON) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring[0].distance(ring[ring.len() - 1]) <= EPSILON {
        ring.pop();
    }
    ring
}
