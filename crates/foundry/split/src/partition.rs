//! Partition engine
//!
//! Draw order is built by shuffling each rating band on its own and then
//! taking one example per band in turn, highest rating first. The head of
//! that order becomes the new validation set, the rest becomes training.
//! With small datasets this keeps every rating level represented in
//! whichever split is filled first.

use crate::filter::Qualified;
use foundry_types::{ExampleId, PartitionStats, Rating, Split, TrainRatio};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// A split assigned to one example by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Position of the example in the snapshot
    pub index: usize,
    pub id: ExampleId,
    pub split: Split,
}

/// Output of [`partition`]. Locked validation examples get no assignment.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub assignments: Vec<Assignment>,
    pub stats: PartitionStats,
}

impl Partition {
    pub fn assigned(&self, split: Split) -> impl Iterator<Item = &Assignment> + '_ {
        self.assignments.iter().filter(move |a| a.split == split)
    }
}

/// Partition qualified examples into train and validation.
///
/// With `lock_existing`, examples already labelled `val` keep their label
/// and are excluded from the draw. Stats only cover qualified examples;
/// the caller fills in the filter's exclusion counts.
pub fn partition<R: Rng + ?Sized>(
    qualified: &[Qualified<'_>],
    train_ratio: TrainRatio,
    lock_existing: bool,
    rng: &mut R,
) -> Partition {
    let (locked, to_split): (Vec<Qualified<'_>>, Vec<Qualified<'_>>) = qualified
        .iter()
        .copied()
        .partition(|q| lock_existing && q.example().is_val());

    let mut stats = PartitionStats {
        qualified_examples: qualified.len(),
        locked_val: locked.len(),
        total_val: locked.len(),
        ..Default::default()
    };

    if to_split.is_empty() {
        tracing::debug!(locked = locked.len(), "Nothing to split, keeping locked set");
        return Partition {
            assignments: Vec::new(),
            stats,
        };
    }

    let val_count = target_val_count(qualified.len(), locked.len(), to_split.len(), train_ratio);
    let order = stratified_order(&to_split, rng);

    let assignments: Vec<Assignment> = order
        .into_iter()
        .enumerate()
        .map(|(position, q)| Assignment {
            index: q.index(),
            id: q.example().id.clone(),
            split: if position < val_count {
                Split::Val
            } else {
                Split::Train
            },
        })
        .collect();

    stats.new_val = val_count;
    stats.new_train = to_split.len() - val_count;
    stats.total_val += stats.new_val;
    stats.total_train = stats.new_train;

    Partition { assignments, stats }
}

/// Number of examples drawn into validation from `to_split`.
///
/// Without a locked set this is `round(to_split * val_fraction)`, never
/// less than one. With a locked set the target is the share of the whole
/// qualified pool minus what is already locked, so re-running over the
/// same data adds nothing. At least one candidate is left for training
/// unless the only candidate is also the only source of a validation set.
fn target_val_count(
    qualified: usize,
    locked: usize,
    to_split: usize,
    train_ratio: TrainRatio,
) -> usize {
    let desired = (qualified as f64 * train_ratio.val_fraction()).round() as usize;
    let count = if locked == 0 {
        desired.max(1)
    } else {
        desired.saturating_sub(locked)
    };

    let cap = if locked == 0 && to_split < 2 {
        to_split
    } else {
        to_split.saturating_sub(1)
    };
    count.min(cap)
}

fn stratified_order<'a, R: Rng + ?Sized>(
    to_split: &[Qualified<'a>],
    rng: &mut R,
) -> Vec<Qualified<'a>> {
    let mut bands: BTreeMap<Rating, Vec<Qualified<'a>>> = BTreeMap::new();
    for q in to_split {
        bands.entry(q.rating()).or_default().push(*q);
    }

    let mut queues: Vec<std::vec::IntoIter<Qualified<'a>>> = bands
        .into_iter()
        .rev()
        .map(|(rating, mut band)| {
            tracing::debug!(rating = rating.value(), size = band.len(), "Shuffling rating band");
            band.shuffle(rng);
            band.into_iter()
        })
        .collect();

    let mut order = Vec::with_capacity(to_split.len());
    loop {
        let before = order.len();
        for queue in queues.iter_mut() {
            if let Some(q) = queue.next() {
                order.push(q);
            }
        }
        if order.len() == before {
            break;
        }
    }
    order
}
