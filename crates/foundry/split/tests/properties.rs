//! Property tests for the split engine.
//!
//! Covers locking idempotence, minimum validation size, quality leakage,
//! coverage, disjointness and stratified representation.

use foundry_split::*;
use foundry_types::{Example, QualityThreshold, Rating, Split, TrainRatio};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashSet};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

/// Generate an unassigned example with an optional rating.
fn arb_example(index: usize) -> impl Strategy<Value = Example> {
    prop::option::of(1i64..=10).prop_map(move |rating| {
        let example = Example::new(format!("ex-{}", index).as_str());
        match rating {
            Some(r) => example.with_rating(Rating::new(r).unwrap()),
            None => example,
        }
    })
}

/// Generate a collection of unassigned examples with distinct ids.
fn arb_examples(max: usize) -> impl Strategy<Value = Vec<Example>> {
    (0..max).prop_flat_map(|len| (0..len).map(arb_example).collect::<Vec<_>>())
}

fn arb_ratio() -> impl Strategy<Value = TrainRatio> {
    (0.01f64..0.99).prop_map(|r| TrainRatio::new(r).unwrap())
}

fn arb_threshold() -> impl Strategy<Value = QualityThreshold> {
    (1i64..=10).prop_map(|t| QualityThreshold::new(t).unwrap())
}

fn split_once(
    examples: &[Example],
    train_ratio: TrainRatio,
    threshold: QualityThreshold,
    seed: u64,
) -> SplitOutcome {
    let request = SplitRequest {
        train_ratio,
        threshold,
        reshuffle: false,
    };
    run_split(
        examples,
        &request,
        &mut AutoConfirm(false),
        &mut StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

fn val_ids(examples: &[Example]) -> BTreeSet<String> {
    examples
        .iter()
        .filter(|e| e.is_val())
        .map(|e| e.id.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn no_quality_leakage(
        examples in arb_examples(40),
        train_ratio in arb_ratio(),
        threshold in arb_threshold(),
        seed in any::<u64>(),
    ) {
        if let SplitOutcome::Applied(result) = split_once(&examples, train_ratio, threshold, seed) {
            for example in &result.examples {
                if !example.is_qualified(threshold) {
                    prop_assert!(example.split.is_none());
                }
            }
        }
    }

    #[test]
    fn every_qualified_example_gets_a_split(
        examples in arb_examples(40),
        train_ratio in arb_ratio(),
        threshold in arb_threshold(),
        seed in any::<u64>(),
    ) {
        if let SplitOutcome::Applied(result) = split_once(&examples, train_ratio, threshold, seed) {
            prop_assert!(result.stats.is_complete());
            for example in &result.examples {
                if example.is_qualified(threshold) {
                    prop_assert!(example.split.is_some());
                }
            }
        }
    }

    #[test]
    fn fresh_split_has_at_least_one_val(
        examples in arb_examples(40),
        train_ratio in arb_ratio(),
        seed in any::<u64>(),
    ) {
        let threshold = QualityThreshold::new(1).unwrap();
        let qualified = examples.iter().filter(|e| e.rating.is_some()).count();
        match split_once(&examples, train_ratio, threshold, seed) {
            SplitOutcome::Applied(result) => {
                prop_assert!(qualified > 0);
                prop_assert!(result.stats.new_val >= 1);
                if qualified >= 2 {
                    prop_assert!(result.stats.new_train >= 1);
                }
            }
            _ => prop_assert_eq!(qualified, 0),
        }
    }

    #[test]
    fn new_train_and_val_are_disjoint_and_cover_to_split(
        examples in arb_examples(40),
        train_ratio in arb_ratio(),
        lock_existing in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let threshold = QualityThreshold::new(1).unwrap();
        let selection = select_qualified(&examples, threshold);
        let result = partition(
            &selection.qualified,
            train_ratio,
            lock_existing,
            &mut StdRng::seed_from_u64(seed),
        );

        let val: HashSet<usize> = result.assigned(Split::Val).map(|a| a.index).collect();
        let train: HashSet<usize> = result.assigned(Split::Train).map(|a| a.index).collect();
        let to_split: HashSet<usize> = selection.qualified.iter().map(|q| q.index()).collect();

        prop_assert!(val.is_disjoint(&train));
        prop_assert_eq!(val.union(&train).copied().collect::<HashSet<_>>(), to_split);
        prop_assert_eq!(val.len(), result.stats.new_val);
        prop_assert_eq!(train.len(), result.stats.new_train);
    }

    #[test]
    fn locked_validation_survives_a_second_run(
        examples in arb_examples(40),
        extra in arb_examples(10),
        train_ratio in arb_ratio(),
        threshold in arb_threshold(),
        seeds in (any::<u64>(), any::<u64>()),
    ) {
        let first = match split_once(&examples, train_ratio, threshold, seeds.0) {
            SplitOutcome::Applied(result) => result,
            _ => return Ok(()),
        };
        let first_val = val_ids(&first.examples);

        // Re-run over the same data: nothing moves.
        let repeat = match split_once(&first.examples, train_ratio, threshold, seeds.1) {
            SplitOutcome::Applied(result) => result,
            other => return Err(TestCaseError::fail(format!("unexpected outcome {:?}", other))),
        };
        prop_assert_eq!(&repeat.examples, &first.examples);
        prop_assert_eq!(repeat.stats.new_val, 0);

        // Add new data: the locked set is still there.
        let mut grown = first.examples.clone();
        grown.extend(extra.into_iter().map(|mut e| {
            e.id = foundry_types::ExampleId::new(format!("extra-{}", e.id));
            e
        }));
        if let SplitOutcome::Applied(second) = split_once(&grown, train_ratio, threshold, seeds.1) {
            prop_assert!(first_val.is_subset(&val_ids(&second.examples)));
            prop_assert_eq!(second.stats.locked_val, first_val.len());
        }
    }

    #[test]
    fn declined_reshuffle_never_mutates(
        examples in arb_examples(30),
        train_ratio in arb_ratio(),
        seed in any::<u64>(),
    ) {
        let threshold = QualityThreshold::new(1).unwrap();
        let first = match split_once(&examples, train_ratio, threshold, seed) {
            SplitOutcome::Applied(result) => result.examples,
            _ => return Ok(()),
        };
        let before = serde_json::to_string(&first).unwrap();

        let request = SplitRequest { train_ratio, threshold, reshuffle: true };
        let outcome = run_split(
            &first,
            &request,
            &mut AutoConfirm(false),
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();

        prop_assert!(matches!(outcome, SplitOutcome::Cancelled));
        prop_assert_eq!(serde_json::to_string(&first).unwrap(), before);
    }
}

// ---------------------------------------------------------------------------
// Stratification
// ---------------------------------------------------------------------------

#[test]
fn both_splits_see_more_than_one_rating() {
    let examples: Vec<Example> = (0..12)
        .map(|i: i64| {
            let rating = if i % 2 == 0 { 9 } else { 6 };
            Example::new(format!("ex-{}", i).as_str()).with_rating(Rating::new(rating).unwrap())
        })
        .collect();

    for seed in 0..50 {
        let outcome = split_once(
            &examples,
            TrainRatio::new(0.7).unwrap(),
            QualityThreshold::new(5).unwrap(),
            seed,
        );
        let result = match outcome {
            SplitOutcome::Applied(result) => result,
            other => panic!("expected applied split, got {:?}", other),
        };

        for split in [Split::Train, Split::Val] {
            let ratings: BTreeSet<u8> = result
                .examples
                .iter()
                .filter(|e| e.split == Some(split))
                .filter_map(|e| e.rating.map(|r| r.value()))
                .collect();
            assert!(ratings.len() > 1, "{} holds ratings {:?}", split, ratings);
        }
    }
}

#[test]
fn reshuffle_without_existing_split_does_not_prompt() {
    struct Refuse;
    impl Confirmer for Refuse {
        fn confirm(&mut self, _prompt: &str) -> Result<bool, SplitError> {
            Err(SplitError::Confirmation("prompt not expected".into()))
        }
    }

    let examples = vec![
        Example::new("a").with_rating(Rating::new(8).unwrap()),
        Example::new("b").with_rating(Rating::new(8).unwrap()),
    ];
    let request = SplitRequest {
        train_ratio: TrainRatio::new(0.5).unwrap(),
        threshold: QualityThreshold::new(7).unwrap(),
        reshuffle: true,
    };
    let outcome = run_split(&examples, &request, &mut Refuse, &mut StdRng::seed_from_u64(0)).unwrap();
    assert!(outcome.is_applied());
}
