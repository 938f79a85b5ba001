//! Voronoi jewelry design geometry
//!
//! Turns a handful of seed points into a cuttable outline: the points are
//! tessellated into Voronoi cells, every cell is shrunk to leave a gap
//! between neighbours, an optional mounting hole is punched into the cell
//! under it, and the result is rounded and exported as SVG for laser
//! cutting.
//!
//! # Quick Start
//!
//! ```rust
//! use voronoi_jewelry::*;
//!
//! let params = DesignParamsBuilder::new()
//!     .gap_width(2.0).unwrap()
//!     .corner_radius(1.0).unwrap()
//!     .build();
//!
//! let mut session = DesignSession::new(params);
//! for (x, y) in [(10.0, 10.0), (90.0, 10.0), (10.0, 90.0), (90.0, 90.0), (45.0, 50.0), (60.0, 55.0)] {
//!     session.add_site(Point::new(x, y));
//! }
//! session.set_hole(Point::new(45.0, 30.0));
//!
//! let svg = session.export_svg(&SvgOptions::default());
//! assert!(svg.is_document());
//! println!("{}", svg);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): KD-tree lookups for picking sites under the pointer
//! - `serde`: Serialization support for parameters, options and results

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod tessellation;
pub mod cell;
pub mod boundary;
pub mod rounding;
pub mod hole;
pub mod spread;
pub mod pipeline;
pub mod export;
pub mod session;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{GeometryError, Result};
pub use config::{DesignParams, DesignParamsBuilder};
pub use geometry::{offset_polygon, Bounds, Point, Polygon};
pub use tessellation::{clip_bounds, DelaunayTessellator, Tessellator};
pub use cell::{classify_cells, CellKind, ClassifiedCells, VoronoiCell};
pub use boundary::{exterior_segments, extract_boundary};
pub use rounding::{round_polygon, round_shape, PathCommand};
pub use hole::{place_hole, Hole, PlacedHole};
pub use spread::{main_boundary, spread_sites, spread_sites_with_options, SpreadOptions, SpreadOutcome};
pub use pipeline::{generate_geometry, FillRole, GeometryResult, ShapePolygon};
pub use export::{export_svg, path_data, ExportLayer, SvgDocument, SvgOptions, SvgStyle};
pub use session::{DesignSession, EditMode};

#[cfg(feature = "spatial-index")]
pub use spatial::SiteIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
