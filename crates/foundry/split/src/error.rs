use foundry_types::{ExampleId, ValidationError};
use thiserror::Error;

/// Errors raised by split operations. All of them occur before the
/// returned snapshot exists, so a failed call never yields partial data.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("confirmation failed: {0}")]
    Confirmation(String),

    #[error("unknown example: {0}")]
    UnknownExample(ExampleId),

    #[error("example {0} is unrated and cannot be assigned a split")]
    UnratedExample(ExampleId),
}
