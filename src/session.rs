//! Interactive design session
//!
//! [`DesignSession`] is what an editor front end drives. It owns the sites,
//! the hole position and the parameters, and keeps the last
//! [`GeometryResult`] current: every mutation reruns the pipeline, except a
//! corner radius change which only re-rounds the cached polygons.

use crate::config::{DesignParams, DesignParamsBuilder};
use crate::error::{GeometryError, Result};
use crate::export::{export_svg, SvgDocument, SvgOptions};
use crate::geometry::Point;
use crate::pipeline::{generate_geometry, GeometryResult};
use crate::spread::{spread_sites_with_options, SpreadOptions};
use crate::tessellation::{DelaunayTessellator, Tessellator};

#[cfg(feature = "spatial-index")]
use crate::spatial::SiteIndex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a click on the canvas does
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditMode {
    #[default]
    AddSites,
    PlaceHole,
}

/// An editable design and its current geometry
///
/// # Examples
///
/// ```
/// use voronoi_jewelry::*;
///
/// let mut session = DesignSession::new(DesignParams::default());
/// for (x, y) in [(10.0, 10.0), (90.0, 10.0), (10.0, 90.0), (90.0, 90.0), (50.0, 50.0)] {
///     session.click(Point::new(x, y));
/// }
/// session.set_mode(EditMode::PlaceHole);
/// session.click(Point::new(50.0, 40.0));
///
/// assert_eq!(session.result().cell_count(), 1);
/// assert!(session.result().hole_included());
/// assert!(session.can_export());
/// ```
pub struct DesignSession<T = DelaunayTessellator> {
    tessellator: T,
    params: DesignParams,
    sites: Vec<Point>,
    hole: Option<Point>,
    mode: EditMode,
    result: GeometryResult,

    /// Rebuilt with every site change (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    index: Option<SiteIndex>,
}

impl DesignSession<DelaunayTessellator> {
    /// Empty session using the default tessellator
    pub fn new(params: DesignParams) -> Self {
        Self::with_tessellator(params, DelaunayTessellator)
    }
}

impl Default for DesignSession<DelaunayTessellator> {
    fn default() -> Self {
        Self::new(DesignParams::default())
    }
}

impl<T: Tessellator> DesignSession<T> {
    /// Empty session using a custom tessellator
    pub fn with_tessellator(params: DesignParams, tessellator: T) -> Self {
        Self {
            tessellator,
            params,
            sites: Vec::new(),
            hole: None,
            mode: EditMode::AddSites,
            result: GeometryResult::empty(),
            #[cfg(feature = "spatial-index")]
            index: None,
        }
    }

    #[inline]
    pub fn params(&self) -> &DesignParams {
        &self.params
    }

    #[inline]
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    #[inline]
    pub fn hole(&self) -> Option<Point> {
        self.hole
    }

    #[inline]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Geometry of the last successful run
    #[inline]
    pub fn result(&self) -> &GeometryResult {
        &self.result
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    /// Add a site or place the hole, depending on the mode
    pub fn click(&mut self, position: Point) {
        match self.mode {
            EditMode::AddSites => {
                self.add_site(position);
            }
            EditMode::PlaceHole => self.set_hole(position),
        }
    }

    /// Append a site and return its index
    pub fn add_site(&mut self, position: Point) -> usize {
        self.sites.push(position);
        self.sites_changed();
        self.sites.len() - 1
    }

    /// Drag a site to a new position
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound` for an unknown index
    pub fn move_site(&mut self, index: usize, position: Point) -> Result<()> {
        let site = self
            .sites
            .get_mut(index)
            .ok_or(GeometryError::SiteNotFound(index))?;
        *site = position;
        self.sites_changed();
        Ok(())
    }

    /// Delete a site; later sites shift down by one
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound` for an unknown index
    pub fn remove_site(&mut self, index: usize) -> Result<Point> {
        if index >= self.sites.len() {
            return Err(GeometryError::SiteNotFound(index));
        }
        let removed = self.sites.remove(index);
        self.sites_changed();
        Ok(removed)
    }

    /// Closest site within `hit_radius` of `position`
    pub fn site_at(&self, position: Point, hit_radius: f64) -> Option<usize> {
        #[cfg(feature = "spatial-index")]
        let nearest = self
            .index
            .as_ref()
            .and_then(|index| index.nearest_within(position, hit_radius));

        #[cfg(not(feature = "spatial-index"))]
        let nearest = self
            .sites
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.distance_squared(position)))
            .filter(|&(_, d)| d <= hit_radius * hit_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);

        nearest
    }

    /// Remove the site under the pointer, if any
    pub fn remove_site_at(&mut self, position: Point, hit_radius: f64) -> Option<Point> {
        let index = self.site_at(position, hit_radius)?;
        self.remove_site(index).ok()
    }

    /// Remove every site, keeping the hole position
    pub fn clear_sites(&mut self) {
        self.sites.clear();
        self.sites_changed();
    }

    /// Start over: no sites, no hole, adding sites
    pub fn clear_all(&mut self) {
        self.sites.clear();
        self.hole = None;
        self.mode = EditMode::AddSites;
        self.sites_changed();
    }

    pub fn set_hole(&mut self, position: Point) {
        self.hole = Some(position);
        self.recompute();
    }

    pub fn clear_hole(&mut self) {
        self.hole = None;
        self.recompute();
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` for a negative or non-finite width; the
    /// session is left untouched
    pub fn set_gap_width(&mut self, width: f64) -> Result<()> {
        self.params = DesignParamsBuilder::from_params(self.params)
            .gap_width(width)?
            .build();
        self.recompute();
        Ok(())
    }

    /// Change the hole size; only reruns the pipeline when a hole is placed
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a non-positive diameter
    pub fn set_hole_diameter(&mut self, diameter: f64) -> Result<()> {
        self.params = DesignParamsBuilder::from_params(self.params)
            .hole_diameter(diameter)?
            .build();
        if self.hole.is_some() {
            self.recompute();
        }
        Ok(())
    }

    /// Change the corner radius without rerunning the pipeline
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a negative radius
    pub fn set_corner_radius(&mut self, radius: f64) -> Result<()> {
        self.params = DesignParamsBuilder::from_params(self.params)
            .corner_radius(radius)?
            .build();
        self.result.reround(self.params.corner_radius);
        Ok(())
    }

    /// Replace all parameters at once and rerun
    pub fn set_params(&mut self, params: DesignParams) {
        self.params = params;
        self.recompute();
    }

    /// Spread the sites evenly inside the current silhouette
    ///
    /// Returns `true` if any site moved (and the geometry was rebuilt).
    pub fn spread_points(&mut self, options: SpreadOptions) -> bool {
        let outcome =
            spread_sites_with_options(&self.sites, &self.result.boundary_polygons, options);
        if !outcome.moved {
            return false;
        }
        self.sites = outcome.sites;
        self.sites_changed();
        true
    }

    /// Whether exporting would produce a document rather than a diagnostic
    pub fn can_export(&self) -> bool {
        self.result.cell_count() > 0
    }

    pub fn export_svg(&self, options: &SvgOptions) -> SvgDocument {
        export_svg(&self.result, &self.params, options)
    }

    /// Rerun the pipeline from the current state
    ///
    /// A failed run leaves an empty result; the error is logged, never
    /// half-applied.
    pub fn recompute(&mut self) {
        self.result =
            match generate_geometry(&self.tessellator, &self.sites, self.hole, &self.params) {
                Ok(result) => result,
                Err(err) => {
                    log::error!("[Session] geometry update failed: {}", err);
                    GeometryResult::empty()
                }
            };
    }

    fn sites_changed(&mut self) {
        #[cfg(feature = "spatial-index")]
        {
            self.index = SiteIndex::new(&self.sites);
        }
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bounds, Polygon};
    use glam::DVec2;

    struct FailingTessellator;

    impl Tessellator for FailingTessellator {
        fn clipped_cells(&self, _: &[Point], _: &Bounds) -> Result<Vec<Option<Polygon>>> {
            Err(GeometryError::TessellationFailed("unavailable".into()))
        }
    }

    fn five_site_session() -> DesignSession {
        let mut session = DesignSession::default();
        for (x, y) in [
            (10.0, 10.0),
            (90.0, 10.0),
            (10.0, 90.0),
            (90.0, 90.0),
            (50.0, 50.0),
        ] {
            session.add_site(DVec2::new(x, y));
        }
        session
    }

    #[test]
    fn test_session_builds_geometry_incrementally() {
        let mut session = DesignSession::default();
        assert!(!session.can_export());
        assert_eq!(session.add_site(DVec2::new(10.0, 10.0)), 0);
        assert_eq!(session.add_site(DVec2::new(90.0, 10.0)), 1);
        assert!(session.result().is_empty());

        let session = five_site_session();
        assert_eq!(session.result().cell_count(), 1);
        assert!(session.can_export());
        assert!(session.export_svg(&SvgOptions::default()).is_document());
    }

    #[test]
    fn test_click_routes_by_mode() {
        let mut session = five_site_session();
        session.set_mode(EditMode::PlaceHole);
        session.click(DVec2::new(50.0, 50.0));
        assert_eq!(session.sites().len(), 5);
        assert_eq!(session.hole(), Some(DVec2::new(50.0, 50.0)));
        assert!(session.result().hole_included());

        session.set_mode(EditMode::AddSites);
        session.click(DVec2::new(30.0, 30.0));
        assert_eq!(session.sites().len(), 6);
    }

    #[test]
    fn test_move_and_remove_sites() {
        let mut session = five_site_session();
        assert_eq!(
            session.move_site(9, DVec2::ZERO),
            Err(GeometryError::SiteNotFound(9))
        );
        assert_eq!(session.remove_site(5), Err(GeometryError::SiteNotFound(5)));

        session.move_site(4, DVec2::new(40.0, 50.0)).unwrap();
        assert_eq!(session.sites()[4], DVec2::new(40.0, 50.0));
        assert_eq!(session.result().cell_count(), 1);

        assert_eq!(session.remove_site(4), Ok(DVec2::new(40.0, 50.0)));
        assert_eq!(session.result().cell_count(), 0);
    }

    #[test]
    fn test_pick_and_remove_site_at() {
        let mut session = five_site_session();
        assert_eq!(session.site_at(DVec2::new(51.0, 49.0), 5.0), Some(4));
        assert_eq!(session.site_at(DVec2::new(30.0, 30.0), 5.0), None);

        assert_eq!(
            session.remove_site_at(DVec2::new(89.0, 11.0), 5.0),
            Some(DVec2::new(90.0, 10.0))
        );
        assert_eq!(session.sites().len(), 4);
        // Index rebuilt after removal
        assert_eq!(session.site_at(DVec2::new(50.0, 50.0), 1.0), Some(3));
        assert_eq!(session.remove_site_at(DVec2::new(30.0, 30.0), 1.0), None);
    }

    #[test]
    fn test_clear_sites_keeps_hole_clear_all_does_not() {
        let mut session = five_site_session();
        session.set_mode(EditMode::PlaceHole);
        session.click(DVec2::new(50.0, 50.0));

        session.clear_sites();
        assert!(session.sites().is_empty());
        assert!(session.hole().is_some());
        assert_eq!(session.mode(), EditMode::PlaceHole);
        assert!(session.site_at(DVec2::new(50.0, 50.0), 10.0).is_none());

        session.clear_all();
        assert!(session.hole().is_none());
        assert_eq!(session.mode(), EditMode::AddSites);
        assert!(session.result().is_empty());
    }

    #[test]
    fn test_invalid_parameters_leave_session_untouched() {
        let mut session = five_site_session();
        let before = *session.params();
        assert!(session.set_gap_width(-1.0).is_err());
        assert!(session.set_hole_diameter(0.0).is_err());
        assert!(session.set_corner_radius(f64::NAN).is_err());
        assert_eq!(*session.params(), before);
    }

    #[test]
    fn test_corner_radius_only_rerounds() {
        let mut session = five_site_session();
        let polygons = session.result().final_polygons.clone();
        session.set_corner_radius(2.0).unwrap();
        assert_eq!(session.result().final_polygons, polygons);
        assert_eq!(session.params().corner_radius, 2.0);

        // A full rerun gives the same rounded paths
        let rerounded = session.result().clone();
        session.recompute();
        assert_eq!(session.result(), &rerounded);
    }

    #[test]
    fn test_hole_diameter_without_hole() {
        let mut session = five_site_session();
        session.set_hole_diameter(4.0).unwrap();
        assert_eq!(session.params().hole_diameter, 4.0);
        assert!(!session.result().hole_included());

        session.set_hole(DVec2::new(50.0, 50.0));
        let hole = session.result().final_polygons.last().unwrap();
        assert!((hole.polygon.bounds().width() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_spread_points_moves_sites() {
        let mut session = five_site_session();
        session.add_site(DVec2::new(52.0, 50.0));
        let before = session.sites().to_vec();

        let moved = session.spread_points(SpreadOptions::default());
        assert!(moved);
        assert_ne!(session.sites(), before.as_slice());
        // Hull sites sit outside the silhouette and never move
        assert_eq!(&session.sites()[..4], &before[..4]);
    }

    #[test]
    fn test_spread_without_silhouette_is_noop() {
        let mut session = DesignSession::default();
        session.add_site(DVec2::new(10.0, 10.0));
        session.add_site(DVec2::new(11.0, 10.0));
        assert!(!session.spread_points(SpreadOptions::default()));
    }

    #[test]
    fn test_failed_run_resets_result() {
        let mut session =
            DesignSession::with_tessellator(DesignParams::default(), FailingTessellator);
        for (x, y) in [(10.0, 10.0), (90.0, 10.0), (50.0, 90.0), (50.0, 40.0)] {
            session.add_site(DVec2::new(x, y));
        }
        assert!(session.result().is_empty());
        assert!(!session.can_export());
        assert!(!session.export_svg(&SvgOptions::default()).is_document());
    }
}
