//! Reported statistics

use crate::{Rating, Split};
use serde::{Deserialize, Serialize};

/// Counts reported after a partition run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionStats {
    /// Examples that passed the quality filter
    pub qualified_examples: usize,
    /// Rated examples below the threshold
    pub below_threshold: usize,
    /// Examples without a rating
    pub unrated: usize,
    /// Validation examples kept from a prior run
    pub locked_val: usize,
    /// Examples newly assigned to validation
    pub new_val: usize,
    /// Examples newly assigned to training
    pub new_train: usize,
    /// Validation examples after the run
    pub total_val: usize,
    /// Training examples after the run
    pub total_train: usize,
}

impl PartitionStats {
    /// Every qualified example holds a split.
    pub fn is_complete(&self) -> bool {
        self.new_train + self.new_val + self.locked_val == self.qualified_examples
    }
}

/// Per-rating count inside one split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCount {
    pub rating: Rating,
    pub count: usize,
}

/// Snapshot of how a collection is currently split
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub total_examples: usize,
    pub qualified_examples: usize,
    pub below_threshold: usize,
    pub unrated: usize,
    pub train: usize,
    pub val: usize,
    pub unassigned: usize,
    /// Rating distribution of `train`, highest rating first
    pub train_bands: Vec<BandCount>,
    /// Rating distribution of `val`, highest rating first
    pub val_bands: Vec<BandCount>,
}

impl SplitSummary {
    pub fn count(&self, split: Option<Split>) -> usize {
        match split {
            Some(Split::Train) => self.train,
            Some(Split::Val) => self.val,
            None => self.unassigned,
        }
    }

    /// Nothing in the collection carries a split label.
    pub fn has_no_splits(&self) -> bool {
        self.train == 0 && self.val == 0
    }
}
