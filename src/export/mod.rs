//! SVG export of a finished design
//!
//! Produces a standalone SVG document. All subpaths go into a single
//! `<path>` element with `fill-rule="evenodd"`, so the clockwise hole cuts
//! through the cell it sits in when the path is filled.

mod style;

pub use style::{to_hex, SvgColor, SvgStyle};

use std::fmt;
use std::fmt::Write as _;

use crate::config::DesignParams;
use crate::geometry::Bounds;
use crate::pipeline::GeometryResult;
use crate::rounding::PathCommand;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returned instead of a document when the design has no cells
pub const NO_CELLS_DIAGNOSTIC: &str =
    "<!-- Error: No valid internal Voronoi cells generated. Add more points. -->";

/// Returned when no exported path has a drawable coordinate
pub const NO_BOUNDS_DIAGNOSTIC: &str = "<!-- Error: Could not determine bounds for SVG. -->";

/// Which outlines end up in the file
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportLayer {
    /// Every shrunk cell plus the hole
    #[default]
    Cells,
    /// The rounded outer silhouette plus the hole
    Silhouette,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SvgOptions {
    pub layer: ExportLayer,
    pub style: SvgStyle,
}

/// Outcome of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgDocument {
    /// A complete SVG file
    Document(String),
    /// An XML comment explaining why nothing could be exported
    Diagnostic(String),
}

impl SvgDocument {
    pub fn is_document(&self) -> bool {
        matches!(self, SvgDocument::Document(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            SvgDocument::Document(s) | SvgDocument::Diagnostic(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            SvgDocument::Document(s) | SvgDocument::Diagnostic(s) => s,
        }
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SVG path data of a command list, coordinates with two decimals
///
/// # Example
///
/// ```rust
/// use voronoi_jewelry::*;
///
/// let commands = [
///     PathCommand::MoveTo(Point::new(0.0, 0.0)),
///     PathCommand::LineTo(Point::new(10.0, 0.0)),
///     PathCommand::QuadTo { control: Point::new(10.0, 10.0), to: Point::new(0.0, 10.0) },
///     PathCommand::Close,
/// ];
/// assert_eq!(
///     path_data(&commands),
///     "M 0.00 0.00 L 10.00 0.00 Q 10.00 10.00 0.00 10.00 Z"
/// );
/// ```
pub fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        // Writing into a String cannot fail
        let _ = match *command {
            PathCommand::MoveTo(p) => write!(d, "M {:.2} {:.2}", p.x, p.y),
            PathCommand::LineTo(p) => write!(d, "L {:.2} {:.2}", p.x, p.y),
            PathCommand::QuadTo { control, to } => write!(
                d,
                "Q {:.2} {:.2} {:.2} {:.2}",
                control.x, control.y, to.x, to.y
            ),
            PathCommand::Close => write!(d, "Z"),
        };
    }
    d
}

/// Paths that belong to the requested layer, skipping collapsed ones
fn layer_paths<'a>(result: &'a GeometryResult, layer: ExportLayer) -> Vec<&'a [PathCommand]> {
    let paths: Vec<&[PathCommand]> = match layer {
        ExportLayer::Cells => result.display_commands.iter().map(|c| c.as_slice()).collect(),
        ExportLayer::Silhouette => result
            .boundary_commands
            .iter()
            .map(|c| c.as_slice())
            .chain(result.hole_commands())
            .collect(),
    };
    paths.into_iter().filter(|c| !c.is_empty()).collect()
}

/// Render the design as an SVG document
///
/// Returns [`SvgDocument::Diagnostic`] when the design has no cells, so the
/// caller can refuse a download.
pub fn export_svg(
    result: &GeometryResult,
    params: &DesignParams,
    options: &SvgOptions,
) -> SvgDocument {
    if result.cell_count() == 0 {
        return SvgDocument::Diagnostic(NO_CELLS_DIAGNOSTIC.to_string());
    }

    let paths = layer_paths(result, options.layer);
    let Some(bounds) = Bounds::from_points(paths.iter().flat_map(|c| c.iter().flat_map(|cmd| cmd.points())))
    else {
        return SvgDocument::Diagnostic(NO_BOUNDS_DIAGNOSTIC.to_string());
    };

    let d = paths
        .iter()
        .map(|c| path_data(c))
        .collect::<Vec<_>>()
        .join(" ");

    let width = bounds.width().max(1.0);
    let height = bounds.height().max(1.0);
    let padding = options.style.stroke_width;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg width=\"{:.2}px\" height=\"{:.2}px\" viewBox=\"{:.2} {:.2} {:.2} {:.2}\" xmlns=\"http://www.w3.org/2000/svg\">",
        width,
        height,
        bounds.min.x - padding,
        bounds.min.y - padding,
        width + 2.0 * padding,
        height + 2.0 * padding
    );
    let _ = writeln!(
        svg,
        "<!-- Generated Voronoi Earring - Gap Width: {:.1}, Hole Dia: {:.1}, Corner Radius: {:.1} -->",
        params.gap_width, params.hole_diameter, params.corner_radius
    );
    let _ = writeln!(
        svg,
        "  <path d=\"{}\" {} fill-rule=\"evenodd\" />",
        d,
        options.style.attributes()
    );
    svg.push_str("</svg>");

    log::debug!(
        "[Export] {} paths on layer {:?}, {:.2}x{:.2}",
        paths.len(),
        options.layer,
        width,
        height
    );

    SvgDocument::Document(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesignParamsBuilder;
    use crate::geometry::{Point, Polygon};
    use crate::pipeline::{generate_geometry, FillRole, ShapePolygon};
    use crate::tessellation::DelaunayTessellator;
    use glam::DVec2;

    fn five_sites() -> Vec<Point> {
        vec![
            DVec2::new(10.0, 10.0),
            DVec2::new(90.0, 10.0),
            DVec2::new(10.0, 90.0),
            DVec2::new(90.0, 90.0),
            DVec2::new(50.0, 50.0),
        ]
    }

    fn unit_square_result() -> GeometryResult {
        let polygon = Polygon::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.5, 0.0),
            DVec2::new(0.5, 0.5),
            DVec2::new(0.0, 0.5),
        ])
        .unwrap();
        let mut result = GeometryResult {
            final_polygons: vec![ShapePolygon {
                polygon,
                role: FillRole::Solid,
                site: Some(0),
            }],
            ..Default::default()
        };
        result.reround(0.0);
        result
    }

    #[test]
    fn test_path_data_sharp_square() {
        let d = path_data(&unit_square_result().display_commands[0]);
        assert_eq!(d, "M 0.00 0.00 L 0.50 0.00 L 0.50 0.50 L 0.00 0.50 Z");
        assert_eq!(path_data(&[]), "");
    }

    #[test]
    fn test_empty_design_gives_diagnostic() {
        let doc = export_svg(
            &GeometryResult::empty(),
            &DesignParams::default(),
            &SvgOptions::default(),
        );
        assert!(!doc.is_document());
        assert_eq!(doc.as_str(), NO_CELLS_DIAGNOSTIC);
    }

    #[test]
    fn test_tiny_design_has_minimum_size() {
        let doc = export_svg(
            &unit_square_result(),
            &DesignParams::default(),
            &SvgOptions::default(),
        );
        assert!(doc.is_document());
        let svg = doc.as_str();
        assert!(svg.starts_with("<svg width=\"1.00px\" height=\"1.00px\""));
        assert!(svg.contains("viewBox=\"-0.50 -0.50 2.00 2.00\""));
    }

    #[test]
    fn test_document_contents() {
        let params = DesignParamsBuilder::new()
            .gap_width(2.0)
            .unwrap()
            .hole_diameter(3.0)
            .unwrap()
            .build();
        let result = generate_geometry(
            &DelaunayTessellator,
            &five_sites(),
            Some(DVec2::new(50.0, 50.0)),
            &params,
        )
        .unwrap();
        let svg = export_svg(&result, &params, &SvgOptions::default()).into_string();

        assert!(svg.contains("Gap Width: 2.0, Hole Dia: 3.0, Corner Radius: 0.0"));
        assert!(svg.contains("fill-rule=\"evenodd\""));
        assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.ends_with("</svg>"));
        // Cell and hole share one path element
        assert_eq!(svg.matches("<path").count(), 1);
        assert_eq!(svg.matches('M').count(), 2);
        // Shrunk diamond spans 11..89
        assert!(svg.contains("width=\"78.00px\""));
        assert!(svg.contains("viewBox=\"10.50 10.50 79.00 79.00\""));
    }

    #[test]
    fn test_silhouette_layer() {
        let params = DesignParams::default();
        let result = generate_geometry(
            &DelaunayTessellator,
            &five_sites(),
            Some(DVec2::new(50.0, 50.0)),
            &params,
        )
        .unwrap();
        let options = SvgOptions {
            layer: ExportLayer::Silhouette,
            ..Default::default()
        };
        let svg = export_svg(&result, &params, &options).into_string();
        // Unshrunk diamond spans 10..90
        assert!(svg.contains("width=\"80.00px\""));
        assert_eq!(svg.matches('M').count(), 2);
    }

    #[test]
    fn test_svg_document_display() {
        let doc = SvgDocument::Diagnostic("<!-- nothing -->".into());
        assert_eq!(doc.to_string(), "<!-- nothing -->");
    }
}
