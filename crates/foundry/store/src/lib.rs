//! Foundry example storage.
//!
//! The split engine treats the store as "read all, write all back". This
//! crate adds the one guard that pattern needs: every snapshot carries a
//! revision, and a commit against a stale revision is rejected instead of
//! silently overwriting a concurrent writer.
//!
//! Backends:
//! - [`memory::InMemoryExampleStore`] for tests and embedding
//! - [`jsonl::JsonlExampleStore`] for flat-file datasets, one example per line

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod error;
pub mod jsonl;
pub mod memory;
mod model;
mod traits;

pub use error::{StorageError, StorageResult};
pub use jsonl::JsonlExampleStore;
pub use memory::InMemoryExampleStore;
pub use model::{ExampleSnapshot, Revision};
pub use traits::ExampleStore;
