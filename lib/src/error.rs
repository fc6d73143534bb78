use thiserror::Error;

/// Failures building a coordinate transform.
///
/// Runtime-degenerate geometry (zero-length shots, a bisector parallel to the
/// baseline) is not an error; those paths return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: f64, height: f64 },

    #[error("degenerate court anchors: {0}")]
    DegenerateAnchors(&'static str),
}
