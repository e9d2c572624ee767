//! Units of work over an example snapshot
//!
//! Each operation reads an immutable snapshot and, when it changes
//! anything, returns a complete new snapshot. Abort paths (empty input,
//! nothing qualified, declined confirmation) return no snapshot at all.

use crate::filter::select_qualified;
use crate::gate::{has_existing_val, Confirmer, PartitionMode};
use crate::partition::partition;
use crate::SplitError;
use foundry_types::{
    BandCount, Example, ExampleId, PartitionStats, QualityThreshold, Rating, Split, SplitSummary,
    TrainRatio,
};
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// Parameters of a split invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitRequest {
    pub train_ratio: TrainRatio,
    pub threshold: QualityThreshold,
    pub reshuffle: bool,
}

/// Applied split: the snapshot to persist and the counts to report
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub examples: Vec<Example>,
    pub stats: PartitionStats,
    pub mode: PartitionMode,
}

#[derive(Debug, Clone)]
pub enum SplitOutcome {
    /// The collection is empty
    NoExamples,
    /// No example meets the quality threshold
    NoQualified { below_threshold: usize, unrated: usize },
    /// Reshuffle was declined at confirmation
    Cancelled,
    Applied(SplitResult),
}

impl SplitOutcome {
    /// Whether the outcome carries a snapshot to persist.
    pub fn is_applied(&self) -> bool {
        matches!(self, SplitOutcome::Applied(_))
    }
}

/// Filter, gate and partition `snapshot` in one step.
pub fn run_split<R: Rng + ?Sized>(
    snapshot: &[Example],
    request: &SplitRequest,
    confirmer: &mut dyn Confirmer,
    rng: &mut R,
) -> Result<SplitOutcome, SplitError> {
    if snapshot.is_empty() {
        return Ok(SplitOutcome::NoExamples);
    }

    let selection = select_qualified(snapshot, request.threshold);
    if selection.is_empty() {
        tracing::info!(
            threshold = request.threshold.value(),
            below_threshold = selection.below_threshold,
            unrated = selection.unrated,
            "No examples meet the quality threshold"
        );
        return Ok(SplitOutcome::NoQualified {
            below_threshold: selection.below_threshold,
            unrated: selection.unrated,
        });
    }

    let mode = PartitionMode::from_state(has_existing_val(snapshot), request.reshuffle);
    let mut decision = mode.decision();
    tracing::debug!(%mode, ?decision, "Lock gate decision");

    if decision.needs_confirmation {
        let existing_val = snapshot.iter().filter(|e| e.is_val()).count();
        let prompt = format!(
            "Reshuffle will discard the existing validation set ({} examples) and re-split all {} qualified examples. Continue?",
            existing_val,
            selection.len()
        );
        if !confirmer.confirm(&prompt)? {
            tracing::info!("Reshuffle declined, leaving splits untouched");
            return Ok(SplitOutcome::Cancelled);
        }
        decision = decision.confirmed();
    }

    let result = partition(
        &selection.qualified,
        request.train_ratio,
        decision.lock_existing,
        rng,
    );

    let mut examples = snapshot.to_vec();
    if mode == PartitionMode::ReshuffleRequestedWithExisting {
        for q in &selection.qualified {
            examples[q.index()].split = None;
        }
    }
    for assignment in &result.assignments {
        examples[assignment.index].split = Some(assignment.split);
    }

    let stats = PartitionStats {
        below_threshold: selection.below_threshold,
        unrated: selection.unrated,
        ..result.stats
    };

    tracing::info!(
        qualified = stats.qualified_examples,
        locked_val = stats.locked_val,
        new_train = stats.new_train,
        new_val = stats.new_val,
        total_train = stats.total_train,
        total_val = stats.total_val,
        "Split computed"
    );

    Ok(SplitOutcome::Applied(SplitResult {
        examples,
        stats,
        mode,
    }))
}

/// Result of clearing the validation set
#[derive(Debug, Clone)]
pub struct UnlockResult {
    pub examples: Vec<Example>,
    pub cleared: usize,
}

/// Reset every `val` example to unassigned. Training labels are left alone.
pub fn unlock_validation(snapshot: &[Example]) -> UnlockResult {
    let mut cleared = 0;
    let examples = snapshot
        .iter()
        .cloned()
        .map(|mut e| {
            if e.is_val() {
                e.split = None;
                cleared += 1;
            }
            e
        })
        .collect();

    UnlockResult { examples, cleared }
}

/// Result of a bulk move
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub examples: Vec<Example>,
    /// Examples whose label actually changed
    pub moved: usize,
}

/// Move the named examples to `target` (`None` clears the label).
///
/// Fails without producing a snapshot if any id is unknown, or if an
/// unrated example would be placed in a split.
pub fn move_examples(
    snapshot: &[Example],
    ids: &[ExampleId],
    target: Option<Split>,
) -> Result<MoveResult, SplitError> {
    let positions: HashMap<&ExampleId, Vec<usize>> =
        snapshot
            .iter()
            .enumerate()
            .fold(HashMap::new(), |mut acc, (index, e)| {
                acc.entry(&e.id).or_insert_with(Vec::new).push(index);
                acc
            });

    let mut examples = snapshot.to_vec();
    let mut moved = 0;
    for id in ids {
        let indices = positions
            .get(id)
            .ok_or_else(|| SplitError::UnknownExample(id.clone()))?;
        for &index in indices {
            let example = &mut examples[index];
            if target.is_some() && example.rating.is_none() {
                return Err(SplitError::UnratedExample(id.clone()));
            }
            if example.split != target {
                example.split = target;
                moved += 1;
            }
        }
    }

    Ok(MoveResult { examples, moved })
}

/// Describe how `snapshot` is currently split.
pub fn summarize(snapshot: &[Example], threshold: QualityThreshold) -> SplitSummary {
    let selection = select_qualified(snapshot, threshold);
    let mut train_bands: BTreeMap<Rating, usize> = BTreeMap::new();
    let mut val_bands: BTreeMap<Rating, usize> = BTreeMap::new();
    let mut summary = SplitSummary {
        total_examples: snapshot.len(),
        qualified_examples: selection.len(),
        below_threshold: selection.below_threshold,
        unrated: selection.unrated,
        ..Default::default()
    };

    for example in snapshot {
        let bands = match example.split {
            Some(Split::Train) => {
                summary.train += 1;
                &mut train_bands
            }
            Some(Split::Val) => {
                summary.val += 1;
                &mut val_bands
            }
            None => {
                summary.unassigned += 1;
                continue;
            }
        };
        if let Some(rating) = example.rating {
            *bands.entry(rating).or_default() += 1;
        }
    }

    summary.train_bands = into_band_counts(train_bands);
    summary.val_bands = into_band_counts(val_bands);
    summary
}

fn into_band_counts(bands: BTreeMap<Rating, usize>) -> Vec<BandCount> {
    bands
        .into_iter()
        .rev()
        .map(|(rating, count)| BandCount { rating, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::AutoConfirm;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rated(id: &str, rating: i64) -> Example {
        Example::new(id).with_rating(Rating::new(rating).unwrap())
    }

    fn request(ratio: f64, threshold: i64, reshuffle: bool) -> SplitRequest {
        SplitRequest {
            train_ratio: TrainRatio::new(ratio).unwrap(),
            threshold: QualityThreshold::new(threshold).unwrap(),
            reshuffle,
        }
    }

    fn applied(outcome: SplitOutcome) -> SplitResult {
        match outcome {
            SplitOutcome::Applied(result) => result,
            other => panic!("expected applied split, got {:?}", other),
        }
    }

    /// Fails the test if consulted.
    struct NeverAsk;

    impl Confirmer for NeverAsk {
        fn confirm(&mut self, prompt: &str) -> Result<bool, SplitError> {
            panic!("unexpected confirmation prompt: {}", prompt);
        }
    }

    #[test]
    fn test_empty_collection_is_informational() {
        let outcome = run_split(
            &[],
            &request(0.8, 7, false),
            &mut NeverAsk,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert!(matches!(outcome, SplitOutcome::NoExamples));
    }

    #[test]
    fn test_nothing_qualified_reports_exclusions() {
        let examples = vec![rated("a", 3), Example::new("b")];
        let outcome = run_split(
            &examples,
            &request(0.8, 7, false),
            &mut NeverAsk,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert!(matches!(
            outcome,
            SplitOutcome::NoQualified {
                below_threshold: 1,
                unrated: 1
            }
        ));
    }

    #[test]
    fn test_excluded_examples_keep_no_split() {
        let examples = vec![
            rated("a", 9),
            rated("b", 9),
            rated("c", 9),
            rated("low", 2),
            Example::new("unrated"),
        ];
        let result = applied(
            run_split(
                &examples,
                &request(0.5, 7, false),
                &mut NeverAsk,
                &mut StdRng::seed_from_u64(4),
            )
            .unwrap(),
        );

        assert!(result.examples[3].split.is_none());
        assert!(result.examples[4].split.is_none());
        assert!(result.examples[..3].iter().all(|e| e.split.is_some()));
        assert_eq!(result.stats.below_threshold, 1);
        assert_eq!(result.stats.unrated, 1);
        assert_eq!(result.mode, PartitionMode::NoExistingSplit);
    }

    #[test]
    fn test_second_run_locks_validation() {
        let examples: Vec<Example> = (0..5).map(|i| rated(&format!("ex-{}", i), 8)).collect();
        let first = applied(
            run_split(
                &examples,
                &request(0.8, 7, false),
                &mut NeverAsk,
                &mut StdRng::seed_from_u64(10),
            )
            .unwrap(),
        );
        assert_eq!(first.stats.total_val, 1);
        assert_eq!(first.stats.total_train, 4);
        let val_id = first
            .examples
            .iter()
            .find(|e| e.is_val())
            .map(|e| e.id.clone())
            .unwrap();

        let mut grown = first.examples.clone();
        grown.push(rated("ex-5", 9));
        let second = applied(
            run_split(
                &grown,
                &request(0.8, 7, false),
                &mut NeverAsk,
                &mut StdRng::seed_from_u64(11),
            )
            .unwrap(),
        );

        assert_eq!(second.mode, PartitionMode::LockedNoReshuffle);
        assert_eq!(second.stats.locked_val, 1);
        assert_eq!(second.stats.total_val, 1);
        assert_eq!(second.stats.total_train, 5);
        let still_val = second.examples.iter().find(|e| e.id == val_id).unwrap();
        assert!(still_val.is_val());
    }

    #[test]
    fn test_declined_reshuffle_is_cancelled() {
        let examples = vec![
            rated("a", 8).with_split(Split::Val),
            rated("b", 8).with_split(Split::Train),
            rated("c", 8),
        ];
        let outcome = run_split(
            &examples,
            &request(0.8, 7, true),
            &mut AutoConfirm(false),
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap();
        assert!(matches!(outcome, SplitOutcome::Cancelled));
        assert!(!outcome.is_applied());
    }

    #[test]
    fn test_confirmed_reshuffle_repartitions_everything() {
        let mut examples: Vec<Example> = (0..10).map(|i| rated(&format!("ex-{}", i), 8)).collect();
        for e in examples.iter_mut().take(2) {
            e.split = Some(Split::Val);
        }
        for e in examples.iter_mut().skip(2) {
            e.split = Some(Split::Train);
        }

        let result = applied(
            run_split(
                &examples,
                &request(0.8, 7, true),
                &mut AutoConfirm(true),
                &mut StdRng::seed_from_u64(3),
            )
            .unwrap(),
        );

        assert_eq!(result.mode, PartitionMode::ReshuffleRequestedWithExisting);
        assert_eq!(result.stats.locked_val, 0);
        assert_eq!(result.stats.new_val, 2);
        assert_eq!(result.stats.new_train, 8);
        assert!(result.stats.is_complete());
    }

    #[test]
    fn test_unlock_clears_only_val() {
        let examples = vec![
            rated("a", 8).with_split(Split::Val),
            rated("b", 8).with_split(Split::Train),
            rated("c", 8).with_split(Split::Val),
        ];
        let result = unlock_validation(&examples);

        assert_eq!(result.cleared, 2);
        assert!(result.examples[0].split.is_none());
        assert_eq!(result.examples[1].split, Some(Split::Train));
        assert!(result.examples[2].split.is_none());
    }

    #[test]
    fn test_move_examples() {
        let examples = vec![rated("a", 8), rated("b", 8).with_split(Split::Val)];
        let result = move_examples(
            &examples,
            &[ExampleId::new("a"), ExampleId::new("b")],
            Some(Split::Val),
        )
        .unwrap();

        assert_eq!(result.moved, 1);
        assert!(result.examples.iter().all(Example::is_val));
    }

    #[test]
    fn test_move_rejects_unknown_and_unrated() {
        let examples = vec![Example::new("a")];
        assert!(matches!(
            move_examples(&examples, &[ExampleId::new("zzz")], Some(Split::Train)),
            Err(SplitError::UnknownExample(_))
        ));
        assert!(matches!(
            move_examples(&examples, &[ExampleId::new("a")], Some(Split::Train)),
            Err(SplitError::UnratedExample(_))
        ));
        let cleared = move_examples(&examples, &[ExampleId::new("a")], None).unwrap();
        assert_eq!(cleared.moved, 0);
    }

    #[test]
    fn test_summary_counts_bands() {
        let examples = vec![
            rated("a", 9).with_split(Split::Train),
            rated("b", 7).with_split(Split::Train),
            rated("c", 9).with_split(Split::Val),
            rated("d", 4),
            Example::new("e"),
        ];
        let summary = summarize(&examples, QualityThreshold::new(7).unwrap());

        assert_eq!(summary.total_examples, 5);
        assert_eq!(summary.qualified_examples, 3);
        assert_eq!(summary.train, 2);
        assert_eq!(summary.val, 1);
        assert_eq!(summary.unassigned, 2);
        assert_eq!(summary.count(None), 2);
        assert_eq!(summary.train_bands[0].rating.value(), 9);
        assert_eq!(summary.train_bands[1].rating.value(), 7);
        assert_eq!(summary.val_bands.len(), 1);
        assert!(!summary.has_no_splits());
    }
}
