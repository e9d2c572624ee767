//! Validated split parameters
//!
//! Both types are checked at construction so the partition engine never
//! sees an out-of-domain value.

use crate::{Rating, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target fraction of examples assigned to `train`, in the open interval (0, 1)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TrainRatio(f64);

impl TrainRatio {
    pub const DEFAULT: f64 = 0.8;

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        // NaN fails both comparisons
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidTrainRatio(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Fraction of examples targeted for `val`.
    pub fn val_fraction(&self) -> f64 {
        1.0 - self.0
    }
}

impl Default for TrainRatio {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for TrainRatio {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TrainRatio> for f64 {
    fn from(ratio: TrainRatio) -> Self {
        ratio.0
    }
}

impl fmt::Display for TrainRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%/{:.0}%", self.0 * 100.0, self.val_fraction() * 100.0)
    }
}

/// Minimum rating an example needs to be eligible for splitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct QualityThreshold(u8);

impl QualityThreshold {
    pub const DEFAULT: u8 = 7;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (Rating::MIN as i64..=Rating::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::InvalidThreshold {
                value,
                min: Rating::MIN,
                max: Rating::MAX,
            })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether a rating meets this threshold.
    pub fn admits(&self, rating: Rating) -> bool {
        rating.value() >= self.0
    }
}

impl Default for QualityThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i64> for QualityThreshold {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QualityThreshold> for i64 {
    fn from(threshold: QualityThreshold) -> Self {
        threshold.0 as i64
    }
}

impl fmt::Display for QualityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
