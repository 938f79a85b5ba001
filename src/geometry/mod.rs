//! Planar geometry primitives
//!
//! Points are `glam::DVec2`. A [`Polygon`] always holds at least three
//! vertices and is implicitly closed; counter-clockwise winding (positive
//! signed area) is a solid region, clockwise winding is a hole.

mod offset;
mod segment;

pub use offset::offset_polygon;
pub use segment::{PointKey, SegmentKey, KEY_PRECISION};

use glam::DVec2;
use std::f64::consts::TAU;

use crate::error::GeometryError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// A point in the design plane (millimetres)
pub type Point = DVec2;

/// Base tolerance for coincident points and zero-area checks
pub const EPSILON: f64 = 1e-5;

/// Minimum number of vertices for a polygon
pub const MIN_VERTICES: usize = 3;

/// Ordered, implicitly closed polygon with at least three vertices
///
/// Deserialization goes through the same vertex-count check as
/// [`Polygon::new`].
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Create a polygon, or `None` if fewer than three vertices are given
    pub fn new(vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() < MIN_VERTICES {
            return None;
        }
        Some(Self { vertices })
    }

    /// Approximate a circle with `segments` vertices, counter-clockwise,
    /// starting at angle zero
    pub fn circle(center: Point, radius: f64, segments: usize) -> Option<Self> {
        if segments < MIN_VERTICES || radius <= 0.0 {
            return None;
        }
        let vertices = (0..segments)
            .map(|i| {
                let angle = (i as f64 / segments as f64) * TAU;
                center + DVec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        Self::new(vertices)
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    /// Iterate over edges as `(start, end)`, wrapping last to first
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid, falling back to the vertex average for
    /// zero-area polygons
    pub fn centroid(&self) -> Point {
        polygon_centroid(&self.vertices).unwrap_or_default()
    }

    /// Even-odd point containment
    pub fn contains(&self, point: Point) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    /// Same vertices in the opposite winding
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.vertices.iter().copied())
            .unwrap_or(Bounds::new(Point::ZERO, Point::ZERO))
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = GeometryError;

    fn try_from(vertices: Vec<Point>) -> std::result::Result<Self, Self::Error> {
        let count = vertices.len();
        Self::new(vertices).ok_or(GeometryError::DegeneratePolygon(count))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Polygon {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawPolygon {
            vertices: Vec<Point>,
        }

        let raw = RawPolygon::deserialize(deserializer)?;
        Polygon::try_from(raw.vertices).map_err(serde::de::Error::custom)
    }
}

/// Axis-aligned rectangle
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest rectangle containing all points, `None` for an empty input
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.include(p);
        }
        Some(bounds)
    }

    pub fn include(&mut self, p: Point) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(self, margin: f64) -> Self {
        let m = DVec2::splat(margin);
        Self::new(self.min - m, self.max + m)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Corners in counter-clockwise order starting at `min`
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }

    /// Whether `p` lies within `tolerance` of any of the four edge lines
    pub fn touches(&self, p: Point, tolerance: f64) -> bool {
        (p.x - self.min.x).abs() < tolerance
            || (p.x - self.max.x).abs() < tolerance
            || (p.y - self.min.y).abs() < tolerance
            || (p.y - self.max.y).abs() < tolerance
    }
}

/// Shoelace signed area; positive for counter-clockwise vertices
pub fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    if n < MIN_VERTICES {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| vertices[i].perp_dot(vertices[(i + 1) % n]))
        .sum();
    twice * 0.5
}

/// Area-weighted centroid of a vertex ring
///
/// Returns `None` only for an empty slice. When the signed area is below
/// [`EPSILON`] the plain vertex average is used instead.
pub fn polygon_centroid(vertices: &[Point]) -> Option<Point> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len();
    let mut area = 0.0;
    let mut acc = DVec2::ZERO;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let cross = a.perp_dot(b);
        area += cross;
        acc += (a + b) * cross;
    }
    area *= 0.5;

    if area.abs() < EPSILON {
        let sum: DVec2 = vertices.iter().copied().sum();
        return Some(sum / n as f64);
    }
    Some(acc / (6.0 * area))
}

/// Even-odd ray casting test; points on an edge may go either way
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < MIN_VERTICES {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (pi, pj) = (vertices[i], vertices[j]);
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
