//! Mass input validation.

use serde::{Deserialize, Serialize};

use crate::{AndhrimnirError, Result};

/// A measured food mass in grams: the scaling basis for per-100g values.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MassGrams(f64);

impl MassGrams {
    /// Validate a raw mass value. Zero, negative, NaN and infinite values
    /// are rejected.
    pub fn new(grams: f64) -> Result<Self> {
        if !grams.is_finite() || grams <= 0.0 {
            return Err(AndhrimnirError::InvalidInput(format!(
                "mass must be a finite number of grams greater than zero, got {grams}"
            )));
        }
        Ok(Self(grams))
    }

    /// The mass in grams.
    pub fn get(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_mass() {
        assert_eq!(MassGrams::new(150.0).unwrap().get(), 150.0);
    }

    #[test]
    fn rejects_zero() {
        assert!(MassGrams::new(0.0).is_err());
    }

    #[test]
    fn rejects_negative() {
        assert!(MassGrams::new(-10.0).is_err());
    }

    #[test]
    fn rejects_nan_and_infinite() {
        assert!(MassGrams::new(f64::NAN).is_err());
        assert!(MassGrams::new(f64::INFINITY).is_err());
        assert!(MassGrams::new(f64::NEG_INFINITY).is_err());
    }
}
