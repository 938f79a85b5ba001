//! Nearest-site lookups for picking sites under the pointer
//!
//! This module is only available with the `spatial-index` feature.

use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

use crate::geometry::Point;

/// KD-tree over site positions
///
/// Rebuilt whenever the site list changes; sessions hold tens to a few
/// hundred sites, so a rebuild is cheaper than keeping a mutable tree in
/// sync with index shifts on removal.
#[derive(Clone)]
pub struct SiteIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

impl SiteIndex {
    /// Build the index, `None` when there are no sites
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_jewelry::*;
    ///
    /// let sites = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)];
    /// let index = SiteIndex::new(&sites).unwrap();
    ///
    /// assert_eq!(index.find_nearest(Point::new(9.0, 1.0)), 1);
    /// assert_eq!(index.nearest_within(Point::new(5.0, 5.0), 2.0), None);
    /// ```
    pub fn new(sites: &[Point]) -> Option<Self> {
        if sites.is_empty() {
            return None;
        }
        let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();
        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        })
    }

    /// Index of the site closest to `position`
    pub fn find_nearest(&self, position: Point) -> usize {
        self.tree
            .nearest_one::<SquaredEuclidean>(&[position.x, position.y])
            .item
    }

    /// Closest site no farther than `radius` from `position`
    pub fn nearest_within(&self, position: Point, radius: f64) -> Option<usize> {
        let nearest = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        (nearest.distance <= radius * radius).then_some(nearest.item)
    }
}
