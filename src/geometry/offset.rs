//! Radial polygon offset
//!
//! Moves each vertex along the ray from the polygon centroid through that
//! vertex. This is not a Minkowski offset; on convex input (every Voronoi
//! cell) it keeps the shape simple and shrinks it toward its centre.

use super::{polygon_centroid, Point, Polygon, EPSILON};

/// Fraction of the vertex-to-centroid distance a shrink may consume
const MAX_SHRINK_FRACTION: f64 = 0.99;

/// Offset a polygon by `distance` (negative shrinks, positive grows)
///
/// Shrinking is clamped per vertex to 99% of its distance from the centroid
/// so no vertex crosses the centre. Vertices sitting on the centroid stay
/// put.
///
/// # Arguments
///
/// * `polygon` - Polygon to offset, usually a convex Voronoi cell
/// * `distance` - Signed distance each vertex moves along its centroid ray
///
/// # Returns
///
/// The offset polygon with the same vertex count, or `None` if the result
/// would have fewer than three vertices
///
/// # Example
///
/// ```rust
/// use voronoi_jewelry::{offset_polygon, Point, Polygon};
///
/// let square = Polygon::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
/// ])
/// .unwrap();
///
/// let shrunk = offset_polygon(&square, -1.0).unwrap();
/// assert_eq!(shrunk.vertex_count(), 4);
/// assert!(shrunk.area() < square.area());
///
/// // A shrink past the centre is clamped instead of inverting the shape
/// let tiny = offset_polygon(&square, -100.0).unwrap();
/// assert!(tiny.area() > 0.0);
/// ```
pub fn offset_polygon(polygon: &Polygon, distance: f64) -> Option<Polygon> {
    let centroid = polygon_centroid(polygon.vertices())?;

    let vertices: Vec<Point> = polygon
        .vertices()
        .iter()
        .map(|&vertex| {
            let radial = vertex - centroid;
            let len = radial.length();
            if len < EPSILON {
                return vertex;
            }
            let effective = if distance < 0.0 {
                distance.max(-len * MAX_SHRINK_FRACTION)
            } else {
                distance
            };
            vertex + radial / len * effective
        })
        .collect();

    Polygon::new(vertices)
}
