//! Stroke and fill styling for exported paths

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color, channels in `0.0..=1.0`
pub type SvgColor = [f32; 4];

/// Presentation attributes of the exported path
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgStyle {
    pub stroke: SvgColor,
    pub stroke_width: f64,
    /// `None` exports an outline only
    pub fill: Option<SvgColor>,
}

impl Default for SvgStyle {
    /// Black hairline, no fill: what a laser cutter expects
    fn default() -> Self {
        Self {
            stroke: [0.0, 0.0, 0.0, 1.0],
            stroke_width: 0.5,
            fill: None,
        }
    }
}

impl SvgStyle {
    /// Light metal look for on-screen previews
    pub fn preview() -> Self {
        Self {
            stroke: [0.3, 0.27, 0.24, 1.0], // Dark bronze
            stroke_width: 0.5,
            fill: Some([0.91, 0.91, 0.91, 1.0]), // Silver
        }
    }

    /// `stroke`, `stroke-width` and `fill` attributes, with opacities when
    /// a color is not fully opaque
    pub(crate) fn attributes(&self) -> String {
        let mut attrs = match self.fill {
            Some(fill) => with_opacity("fill", fill),
            None => "fill=\"none\"".to_string(),
        };
        attrs.push(' ');
        attrs.push_str(&with_opacity("stroke", self.stroke));
        attrs.push_str(&format!(" stroke-width=\"{}\"", self.stroke_width));
        attrs
    }
}

/// `#rrggbb` form of a color, alpha ignored
pub fn to_hex(color: SvgColor) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color[0]),
        channel(color[1]),
        channel(color[2])
    )
}

fn with_opacity(name: &str, color: SvgColor) -> String {
    let mut attr = format!("{}=\"{}\"", name, to_hex(color));
    if color[3] < 1.0 {
        attr.push_str(&format!(" {}-opacity=\"{}\"", name, color[3].clamp(0.0, 1.0)));
    }
    attr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex([0.0, 0.0, 0.0, 1.0]), "#000000");
        assert_eq!(to_hex([1.0, 1.0, 1.0, 1.0]), "#ffffff");
        assert_eq!(to_hex([1.0, 0.5, 0.0, 0.2]), "#ff8000");
        // Out of range channels are clamped
        assert_eq!(to_hex([2.0, -1.0, 0.0, 1.0]), "#ff0000");
    }

    #[test]
    fn test_default_style_is_outline_only() {
        let attrs = SvgStyle::default().attributes();
        assert_eq!(
            attrs,
            "fill=\"none\" stroke=\"#000000\" stroke-width=\"0.5\""
        );
    }

    #[test]
    fn test_translucent_fill_gets_opacity() {
        let style = SvgStyle {
            fill: Some([1.0, 0.0, 0.0, 0.5]),
            ..Default::default()
        };
        let attrs = style.attributes();
        assert!(attrs.starts_with("fill=\"#ff0000\" fill-opacity=\"0.5\""));
        assert!(!attrs.contains("stroke-opacity"));

        let preview = SvgStyle::preview().attributes();
        assert!(preview.contains("fill=\"#e8e8e8\""));
    }
}
