//! Foundry Types - Core types for fine-tuning dataset curation
//!
//! Foundry curates rated examples for supervised fine-tuning and partitions
//! them into stable train/validation splits before they are exported to a
//! training provider.
//!
//! ## Key Concepts
//!
//! - **Example**: A single training candidate with an id, an optional rating
//!   and an optional split label. Everything else is opaque payload.
//! - **Rating**: Quality score on the 1-10 scale, assigned by reviewers.
//! - **Split**: `train` or `val`. Validation examples from a prior run are
//!   locked until explicitly unlocked or reshuffled.
//! - **Stats**: Counts reported after a partition run or a dataset summary.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod example;
pub mod ids;
pub mod params;
pub mod rating;
pub mod split;
pub mod stats;

pub use error::ValidationError;
pub use example::Example;
pub use ids::ExampleId;
pub use params::{QualityThreshold, TrainRatio};
pub use rating::Rating;
pub use split::Split;
pub use stats::{BandCount, PartitionStats, SplitSummary};
