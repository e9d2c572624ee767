//! CLI error types

use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Dataset storage error
    #[error("Storage error: {0}")]
    Storage(#[from] foundry_store::StorageError),

    /// Split operation error
    #[error("Split error: {0}")]
    Split(#[from] foundry_split::SplitError),

    /// Invalid parameter
    #[error("Invalid input: {0}")]
    Validation(#[from] foundry_types::ValidationError),

    /// Export error
    #[error("Export error: {0}")]
    Export(#[from] foundry_export::ExportError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input record
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
