//! Stats command

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{self, print_info, OutputFormat};
use clap::Args;
use foundry_split::summarize;
use foundry_store::{ExampleStore, JsonlExampleStore};
use foundry_types::SplitSummary;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

/// Arguments for `foundry stats`
#[derive(Args)]
pub struct StatsArgs {
    /// Minimum rating counted as qualified (1-10)
    #[arg(short, long, env = "FOUNDRY_QUALITY_THRESHOLD")]
    threshold: Option<i64>,
}

#[derive(Debug, Serialize, Tabled)]
struct SummaryRow {
    metric: String,
    count: usize,
}

impl SummaryRow {
    fn new(metric: impl Into<String>, count: usize) -> Self {
        Self {
            metric: metric.into(),
            count,
        }
    }
}

fn summary_rows(summary: &SplitSummary) -> Vec<SummaryRow> {
    let mut rows = vec![
        SummaryRow::new("total", summary.total_examples),
        SummaryRow::new("qualified", summary.qualified_examples),
        SummaryRow::new("below threshold", summary.below_threshold),
        SummaryRow::new("unrated", summary.unrated),
        SummaryRow::new("train", summary.train),
        SummaryRow::new("val", summary.val),
        SummaryRow::new("unassigned", summary.unassigned),
    ];
    for band in &summary.train_bands {
        rows.push(SummaryRow::new(format!("train rating {}", band.rating), band.count));
    }
    for band in &summary.val_bands {
        rows.push(SummaryRow::new(format!("val rating {}", band.rating), band.count));
    }
    rows
}

/// Execute `foundry stats`
pub async fn execute(
    args: StatsArgs,
    dataset: &Path,
    config: &CliConfig,
    format: OutputFormat,
) -> CliResult<()> {
    let threshold = config.quality_threshold(args.threshold)?;
    let store = JsonlExampleStore::new(dataset);
    let snapshot = store.load().await?;
    let summary = summarize(&snapshot.examples, threshold);

    match format {
        OutputFormat::Table => {
            if summary.total_examples == 0 {
                print_info(&format!("No examples in {}", dataset.display()));
                return Ok(());
            }
            if summary.has_no_splits() {
                print_info("No examples have been split yet");
            }
            output::print_output(summary_rows(&summary), format)
        }
        _ => output::print_single(&summary, format),
    }
}
