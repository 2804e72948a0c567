use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// Progress along a path, always within `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Offset(f64);

impl Offset {
    pub const START: Offset = Offset(0.0);
    pub const END: Offset = Offset(1.0);

    pub fn new(value: f64) -> Result<Self, GeometryError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GeometryError::OffsetOutOfRange(value))
        }
    }

    /// Wraps any finite value into `[0, 1)`; non-finite input maps to the start.
    pub fn wrapping(value: f64) -> Self {
        if !value.is_finite() {
            return Self::START;
        }
        let wrapped = value.rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative inputs
        if wrapped >= 1.0 {
            Self::START
        } else {
            Self(wrapped)
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Offset {
    type Error = GeometryError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Offset> for f64 {
    fn from(offset: Offset) -> Self {
        offset.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(Offset::new(1.5), Err(GeometryError::OffsetOutOfRange(1.5)));
        assert!(Offset::new(-0.01).is_err());
        assert!(Offset::new(f64::NAN).is_err());
        assert_eq!(Offset::new(1.0).unwrap(), Offset::END);
    }

    #[test]
    fn test_wrapping() {
        assert!((Offset::wrapping(1.25).get() - 0.25).abs() < 1e-12);
        assert!((Offset::wrapping(-0.25).get() - 0.75).abs() < 1e-12);
        assert_eq!(Offset::wrapping(3.0), Offset::START);
        assert_eq!(Offset::wrapping(-1e-20), Offset::START);
        assert_eq!(Offset::wrapping(f64::INFINITY), Offset::START);
    }

    #[test]
    fn test_serde_validates() {
        let ok: Offset = serde_json::from_str("0.4").unwrap();
        assert_eq!(ok.get(), 0.4);
        assert!(serde_json::from_str::<Offset>("2.0").is_err());
    }
}
