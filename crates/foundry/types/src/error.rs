//! Validation errors for Foundry parameters and records

use thiserror::Error;

/// Raised before any mutation when an input falls outside its domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Train ratio outside the open interval (0, 1)
    #[error("train ratio must be strictly between 0 and 1, got {0}")]
    InvalidTrainRatio(f64),

    /// Quality threshold outside the rating scale
    #[error("quality threshold must be between {min} and {max}, got {value}")]
    InvalidThreshold { value: i64, min: u8, max: u8 },

    /// Rating outside the rating scale
    #[error("rating must be between {min} and {max}, got {value}")]
    InvalidRating { value: i64, min: u8, max: u8 },

    /// Unknown split label
    #[error("invalid split '{0}', expected 'train' or 'val'")]
    InvalidSplit(String),
}
