use crate::model::{ExampleSnapshot, Revision};
use crate::StorageResult;
use async_trait::async_trait;
use foundry_types::Example;

/// Storage interface for the example collection.
#[async_trait]
pub trait ExampleStore: Send + Sync {
    /// Read the whole collection together with its current revision.
    async fn load(&self) -> StorageResult<ExampleSnapshot>;

    /// Replace the whole collection.
    ///
    /// Fails with [`crate::StorageError::Conflict`] if the stored revision
    /// is no longer `expected`; nothing is written in that case.
    async fn commit(&self, expected: &Revision, examples: Vec<Example>) -> StorageResult<Revision>;

    /// Add new examples at the end of the collection. Ids must not already
    /// exist.
    async fn append(&self, examples: Vec<Example>) -> StorageResult<Revision>;
}
