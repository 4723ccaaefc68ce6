use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::math::TOLERANCE;

/// Per-axis distortion applied to centred, scaled offsets.
///
/// Both variants are odd functions, so the sign of an offset survives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warp {
    /// `x / divisor`.
    Linear { divisor: f64 },
    /// `sign(x) * sqrt(|x|)`: compresses the outskirts, magnifies the centre.
    SignedSqrt,
}

impl Default for Warp {
    fn default() -> Self {
        Self::Linear { divisor: 1.0 }
    }
}

impl Warp {
    /// Checks that the warp is invertible.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidWarp` for a zero or non-finite
    /// linear divisor.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match *self {
            Self::Linear { divisor } if divisor.abs() < TOLERANCE || !divisor.is_finite() => Err(
                ConfigurationError::InvalidWarp(format!(
                    "linear divisor must be finite and non-zero, got {divisor}"
                )),
            ),
            _ => Ok(()),
        }
    }

    /// Applies the warp to a single axis value.
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            Self::Linear { divisor } => x / divisor,
            Self::SignedSqrt => x.signum() * x.abs().sqrt(),
        }
    }

    /// Undoes [`apply`](Self::apply).
    #[must_use]
    pub fn invert(&self, x: f64) -> f64 {
        match *self {
            Self::Linear { divisor } => x * divisor,
            Self::SignedSqrt => x.signum() * x * x,
        }
    }
}
