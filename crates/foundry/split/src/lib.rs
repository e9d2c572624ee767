//! Foundry train/validation splitting.
//!
//! Turns a continuously-rated pool of examples into stable, non-overlapping
//! train/validation splits:
//! - the quality filter selects rated examples at or above a threshold
//! - the lock gate decides whether an existing validation set is kept,
//!   needs confirmation before being discarded, or is absent
//! - the partition engine shuffles each rating band independently and
//!   interleaves the bands, highest rating first, to draw the new
//!   validation examples
//!
//! Every operation takes an immutable snapshot and returns a new one, so
//! the persistence layer decides when (and whether) a result is written.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod error;
pub mod filter;
pub mod gate;
pub mod operation;
pub mod partition;

pub use error::SplitError;
pub use filter::{select_qualified, Qualified, QualitySelection};
pub use gate::{
    decide_partition_mode, has_existing_val, AutoConfirm, Confirmer, GateDecision, PartitionMode,
};
pub use operation::{
    move_examples, run_split, summarize, unlock_validation, MoveResult, SplitOutcome,
    SplitRequest, SplitResult, UnlockResult,
};
pub use partition::{partition, Assignment, Partition};
