//! Example records
//!
//! Only `id`, `rating` and `split` carry meaning for curation. Conversation
//! content, timestamps and version counters are kept in `payload` and written
//! back untouched.

use crate::{ExampleId, QualityThreshold, Rating, Split};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single fine-tuning candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// Unique, stable identifier
    pub id: ExampleId,

    /// Reviewer rating; `None` means unrated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,

    /// Assigned split; `None` means unassigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<Split>,

    /// Opaque payload (messages, input/output, timestamps, ...)
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Example {
    /// Create an unrated, unassigned example with an empty payload
    pub fn new(id: impl Into<ExampleId>) -> Self {
        Self {
            id: id.into(),
            rating: None,
            split: None,
            payload: Map::new(),
        }
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_split(mut self, split: Split) -> Self {
        self.split = Some(split);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Rated and at or above the threshold.
    pub fn is_qualified(&self, threshold: QualityThreshold) -> bool {
        self.rating.is_some_and(|r| threshold.admits(r))
    }

    pub fn is_val(&self) -> bool {
        self.split == Some(Split::Val)
    }

    pub fn is_train(&self) -> bool {
        self.split == Some(Split::Train)
    }
}
