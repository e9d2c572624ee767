use crate::{StorageError, StorageResult};
use foundry_types::Example;
use std::collections::HashSet;
use std::fmt;

/// Opaque version stamp of a stored collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full collection as read at one revision.
#[derive(Debug, Clone)]
pub struct ExampleSnapshot {
    pub examples: Vec<Example>,
    pub revision: Revision,
}

impl ExampleSnapshot {
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }
}

/// Reject collections where two examples share an id.
pub(crate) fn ensure_unique_ids(examples: &[Example]) -> StorageResult<()> {
    let mut seen = HashSet::with_capacity(examples.len());
    for example in examples {
        if !seen.insert(&example.id) {
            return Err(StorageError::InvariantViolation(format!(
                "duplicate example id {}",
                example.id
            )));
        }
    }
    Ok(())
}
