//! Strongly-typed identifier for examples
//!
//! Stored datasets use either integer or string ids. Both shapes are kept
//! as-is so that a load/commit cycle writes the id back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique, stable identifier of an example
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExampleId {
    Int(i64),
    Text(String),
}

impl ExampleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self::Text(id.into())
    }

    pub fn generate() -> Self {
        Self::Text(Uuid::new_v4().to_string())
    }

    /// Parse a user-supplied id, preferring the integer form when it fits.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Text(raw.to_string()),
        }
    }
}

impl From<i64> for ExampleId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for ExampleId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}
