//! In-memory reference implementation of [`ExampleStore`].
//!
//! Deterministic and test-friendly. Revisions are a monotonically
//! increasing counter.

use crate::model::{ensure_unique_ids, ExampleSnapshot, Revision};
use crate::traits::ExampleStore;
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use foundry_types::Example;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Default)]
struct State {
    examples: Vec<Example>,
    version: u64,
}

impl State {
    fn revision(&self) -> Revision {
        Revision::new(format!("mem-{}", self.version))
    }
}

/// In-memory example store.
#[derive(Default)]
pub struct InMemoryExampleStore {
    state: RwLock<State>,
}

impl InMemoryExampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_examples(examples: Vec<Example>) -> StorageResult<Self> {
        ensure_unique_ids(&examples)?;
        Ok(Self {
            state: RwLock::new(State {
                examples,
                version: 0,
            }),
        })
    }
}

#[async_trait]
impl ExampleStore for InMemoryExampleStore {
    async fn load(&self) -> StorageResult<ExampleSnapshot> {
        let guard = self
            .state
            .read()
            .map_err(|_| StorageError::Backend("examples lock poisoned".to_string()))?;
        Ok(ExampleSnapshot {
            examples: guard.examples.clone(),
            revision: guard.revision(),
        })
    }

    async fn commit(&self, expected: &Revision, examples: Vec<Example>) -> StorageResult<Revision> {
        ensure_unique_ids(&examples)?;
        let mut guard = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("examples lock poisoned".to_string()))?;

        let current = guard.revision();
        if &current != expected {
            return Err(StorageError::Conflict(format!(
                "collection moved from revision {} to {}",
                expected, current
            )));
        }

        guard.examples = examples;
        guard.version += 1;
        Ok(guard.revision())
    }

    async fn append(&self, examples: Vec<Example>) -> StorageResult<Revision> {
        ensure_unique_ids(&examples)?;
        let mut guard = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("examples lock poisoned".to_string()))?;

        let existing: HashSet<_> = guard.examples.iter().map(|e| &e.id).collect();
        if let Some(dup) = examples.iter().find(|e| existing.contains(&e.id)) {
            return Err(StorageError::Conflict(format!(
                "example {} already exists",
                dup.id
            )));
        }

        guard.examples.extend(examples);
        guard.version += 1;
        Ok(guard.revision())
    }
}
