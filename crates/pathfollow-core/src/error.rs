use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("offset {0} is outside [0, 1]")]
    OffsetOutOfRange(f64),

    #[error("trail length {0} must lie in (0, 1)")]
    InvalidTrailLength(f64),

    #[error("stroke width {0} must be positive")]
    InvalidStrokeWidth(f64),
}
