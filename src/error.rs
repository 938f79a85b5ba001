//! Error types for the design pipeline

use thiserror::Error;

/// Errors that can occur while configuring or computing a design
///
/// Degenerate geometry inside the pipeline is not an error: operations that
/// collapse a polygon return `None` or an empty command list and the caller
/// skips the element. `DegeneratePolygon` only reports polygons built from
/// outside data, such as a deserialized design.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The tessellation capability could not produce cells
    #[error("tessellation failed: {0}")]
    TessellationFailed(String),
    /// A polygon was built from fewer than three vertices
    #[error("polygon needs at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),
    /// Requested site index does not exist
    #[error("site not found: {0}")]
    SiteNotFound(usize),
}

/// Result type alias for design operations
pub type Result<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GeometryError::InvalidConfig("gap width must be >= 0".into());
        assert_eq!(err.to_string(), "invalid configuration: gap width must be >= 0");

        let err = GeometryError::SiteNotFound(7);
        assert_eq!(err.to_string(), "site not found: 7");
    }
}
