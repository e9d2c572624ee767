//! Split, unlock and move commands

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{self, print_info, print_success, print_warning, OutputFormat};
use crate::prompt::PromptConfirmer;
use clap::{Args, ValueEnum};
use foundry_split::{
    move_examples, run_split, unlock_validation, Confirmer, SplitOutcome, SplitRequest,
};
use foundry_store::{ExampleStore, JsonlExampleStore};
use foundry_types::{ExampleId, PartitionStats, Split};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

/// Arguments for `foundry split`
#[derive(Args)]
pub struct SplitArgs {
    /// Fraction of qualified examples assigned to train, between 0 and 1
    #[arg(short, long, env = "FOUNDRY_TRAIN_RATIO")]
    ratio: Option<f64>,

    /// Minimum rating for an example to be split (1-10)
    #[arg(short, long, env = "FOUNDRY_QUALITY_THRESHOLD")]
    threshold: Option<i64>,

    /// Discard the existing validation set and re-split everything
    #[arg(long)]
    reshuffle: bool,

    /// Skip confirmation
    #[arg(short = 'y', long)]
    yes: bool,

    /// Shuffle seed for a reproducible split
    #[arg(long, env = "FOUNDRY_SEED")]
    seed: Option<u64>,

    /// Compute and report the split without writing it
    #[arg(long)]
    dry_run: bool,
}

/// Arguments for `foundry unlock`
#[derive(Args)]
pub struct UnlockArgs {
    /// Skip confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

/// Target of `foundry move`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoveTarget {
    Train,
    Val,
    /// Clear the split label
    None,
}

impl From<MoveTarget> for Option<Split> {
    fn from(target: MoveTarget) -> Self {
        match target {
            MoveTarget::Train => Some(Split::Train),
            MoveTarget::Val => Some(Split::Val),
            MoveTarget::None => None,
        }
    }
}

/// Arguments for `foundry move`
#[derive(Args)]
pub struct MoveArgs {
    /// Example ids
    #[arg(required = true)]
    ids: Vec<String>,

    /// Destination split
    #[arg(long, value_enum)]
    to: MoveTarget,
}

/// Table row for split statistics
#[derive(Debug, Serialize, Tabled)]
struct StatRow {
    /// Metric name
    metric: &'static str,
    /// Example count
    count: usize,
}

fn stat_rows(stats: &PartitionStats) -> Vec<StatRow> {
    vec![
        StatRow {
            metric: "qualified",
            count: stats.qualified_examples,
        },
        StatRow {
            metric: "below threshold",
            count: stats.below_threshold,
        },
        StatRow {
            metric: "unrated",
            count: stats.unrated,
        },
        StatRow {
            metric: "locked val",
            count: stats.locked_val,
        },
        StatRow {
            metric: "new train",
            count: stats.new_train,
        },
        StatRow {
            metric: "new val",
            count: stats.new_val,
        },
        StatRow {
            metric: "total train",
            count: stats.total_train,
        },
        StatRow {
            metric: "total val",
            count: stats.total_val,
        },
    ]
}

/// Execute `foundry split`
pub async fn split(
    args: SplitArgs,
    dataset: &Path,
    config: &CliConfig,
    format: OutputFormat,
) -> CliResult<()> {
    let request = SplitRequest {
        train_ratio: config.train_ratio(args.ratio)?,
        threshold: config.quality_threshold(args.threshold)?,
        reshuffle: args.reshuffle,
    };
    let mut rng = match config.seed(args.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let store = JsonlExampleStore::new(dataset);
    let snapshot = store.load().await?;
    let mut confirmer = PromptConfirmer::new(args.yes);

    match run_split(&snapshot.examples, &request, &mut confirmer, &mut rng)? {
        SplitOutcome::NoExamples => {
            print_info(&format!(
                "No examples in {}; nothing to split",
                dataset.display()
            ));
        }
        SplitOutcome::NoQualified {
            below_threshold,
            unrated,
        } => {
            print_warning(&format!(
                "No examples rated {} or higher ({} below threshold, {} unrated); nothing to split",
                request.threshold, below_threshold, unrated
            ));
        }
        SplitOutcome::Cancelled => {
            print_warning("Cancelled; no examples were changed");
        }
        SplitOutcome::Applied(result) => {
            if args.dry_run {
                print_info(&format!("Dry run ({}); nothing written", result.mode));
            } else {
                store.commit(&snapshot.revision, result.examples).await?;
                print_success(&format!(
                    "Split {} qualified examples at {} train/val ({})",
                    result.stats.qualified_examples, request.train_ratio, result.mode
                ));
            }
            match format {
                OutputFormat::Table => output::print_output(stat_rows(&result.stats), format)?,
                _ => output::print_single(&result.stats, format)?,
            }
        }
    }

    Ok(())
}

/// Execute `foundry unlock`
pub async fn unlock(args: UnlockArgs, dataset: &Path) -> CliResult<()> {
    let store = JsonlExampleStore::new(dataset);
    let snapshot = store.load().await?;
    let result = unlock_validation(&snapshot.examples);

    if result.cleared == 0 {
        print_info("No validation examples to unlock");
        return Ok(());
    }

    let mut confirmer = PromptConfirmer::new(args.yes);
    let prompt = format!(
        "Unlock {} validation examples? The next split will redraw the validation set.",
        result.cleared
    );
    if !confirmer.confirm(&prompt)? {
        print_warning("Cancelled; no examples were changed");
        return Ok(());
    }

    store.commit(&snapshot.revision, result.examples).await?;
    print_success(&format!(
        "Unlocked {} validation examples",
        result.cleared
    ));
    Ok(())
}

/// Execute `foundry move`
pub async fn move_to(args: MoveArgs, dataset: &Path) -> CliResult<()> {
    let ids: Vec<ExampleId> = args.ids.iter().map(|id| ExampleId::parse(id)).collect();
    let target: Option<Split> = args.to.into();

    let store = JsonlExampleStore::new(dataset);
    let snapshot = store.load().await?;
    let result = move_examples(&snapshot.examples, &ids, target)?;

    if result.moved == 0 {
        print_info("Examples already in place; nothing changed");
        return Ok(());
    }

    store.commit(&snapshot.revision, result.examples).await?;
    let destination = target.map(|s| s.to_string()).unwrap_or_else(|| "unassigned".into());
    print_success(&format!("Moved {} examples to {}", result.moved, destination));
    Ok(())
}
