//! Confirmation / lock gate
//!
//! Recomputed on every invocation from the snapshot; nothing about the gate
//! is persisted.

use crate::SplitError;
use foundry_types::Example;
use serde::Serialize;
use std::fmt;

/// State of the gate for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PartitionMode {
    /// No validation set exists yet
    NoExistingSplit,
    /// Validation set exists and is kept
    LockedNoReshuffle,
    /// Validation set exists and the caller wants it discarded
    ReshuffleRequestedWithExisting,
    /// Reshuffle requested but there is nothing to discard
    ReshuffleRequestedNoExisting,
}

impl PartitionMode {
    pub fn from_state(has_existing_val: bool, reshuffle_requested: bool) -> Self {
        match (has_existing_val, reshuffle_requested) {
            (false, false) => Self::NoExistingSplit,
            (true, false) => Self::LockedNoReshuffle,
            (true, true) => Self::ReshuffleRequestedWithExisting,
            (false, true) => Self::ReshuffleRequestedNoExisting,
        }
    }

    pub fn decision(&self) -> GateDecision {
        match self {
            Self::NoExistingSplit | Self::ReshuffleRequestedNoExisting => GateDecision {
                proceed: true,
                lock_existing: false,
                needs_confirmation: false,
            },
            Self::LockedNoReshuffle => GateDecision {
                proceed: true,
                lock_existing: true,
                needs_confirmation: false,
            },
            Self::ReshuffleRequestedWithExisting => GateDecision {
                proceed: false,
                lock_existing: false,
                needs_confirmation: true,
            },
        }
    }
}

impl fmt::Display for PartitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoExistingSplit => "fresh split",
            Self::LockedNoReshuffle => "validation set locked",
            Self::ReshuffleRequestedWithExisting => "reshuffle over existing split",
            Self::ReshuffleRequestedNoExisting => "reshuffle (no existing split)",
        };
        f.write_str(label)
    }
}

/// What the gate allows for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub proceed: bool,
    pub lock_existing: bool,
    pub needs_confirmation: bool,
}

impl GateDecision {
    /// Decision after the caller confirmed a pending reshuffle.
    pub fn confirmed(self) -> Self {
        Self {
            proceed: true,
            needs_confirmation: false,
            ..self
        }
    }
}

pub fn decide_partition_mode(has_existing_val: bool, reshuffle_requested: bool) -> GateDecision {
    PartitionMode::from_state(has_existing_val, reshuffle_requested).decision()
}

/// Whether any example in the snapshot is already labelled `val`.
pub fn has_existing_val(examples: &[Example]) -> bool {
    examples.iter().any(Example::is_val)
}

/// Source of destructive-action confirmation.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> Result<bool, SplitError>;
}

/// Answers every prompt with a fixed value; `AutoConfirm(true)` is the
/// non-interactive `--yes` path.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool, SplitError> {
        tracing::debug!(prompt, answer = self.0, "Auto-answering confirmation");
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_types::Split;

    #[test]
    fn test_no_existing_split_proceeds() {
        let decision = decide_partition_mode(false, false);
        assert!(decision.proceed);
        assert!(!decision.lock_existing);
        assert!(!decision.needs_confirmation);
    }

    #[test]
    fn test_existing_val_is_locked_by_default() {
        let decision = decide_partition_mode(true, false);
        assert_eq!(
            decision,
            GateDecision {
                proceed: true,
                lock_existing: true,
                needs_confirmation: false,
            }
        );
    }

    #[test]
    fn test_reshuffle_over_existing_needs_confirmation() {
        let decision = decide_partition_mode(true, true);
        assert!(!decision.proceed);
        assert!(decision.needs_confirmation);
        assert!(!decision.lock_existing);

        let confirmed = decision.confirmed();
        assert!(confirmed.proceed);
        assert!(!confirmed.lock_existing);
    }

    #[test]
    fn test_reshuffle_without_existing_behaves_like_fresh() {
        assert_eq!(
            decide_partition_mode(false, true),
            decide_partition_mode(false, false)
        );
        assert_eq!(
            PartitionMode::from_state(false, true),
            PartitionMode::ReshuffleRequestedNoExisting
        );
    }

    #[test]
    fn test_existing_val_predicate() {
        let none = vec![Example::new("a"), Example::new("b").with_split(Split::Train)];
        let some = vec![Example::new("a").with_split(Split::Val)];
        assert!(!has_existing_val(&none));
        assert!(has_existing_val(&some));
        assert!(!has_existing_val(&[]));
    }
}
