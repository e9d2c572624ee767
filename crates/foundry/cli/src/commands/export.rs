//! Export command

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{self, print_success, print_warning, OutputFormat};
use clap::Args;
use foundry_export::{write_export, ExportFormat};
use foundry_store::{ExampleStore, JsonlExampleStore};
use std::path::{Path, PathBuf};

/// Arguments for `foundry export`
#[derive(Args)]
pub struct ExportArgs {
    /// Output directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Record format (chat, completion)
    #[arg(short, long, default_value = "chat")]
    format: String,

    /// Minimum rating for an example to be exported (1-10)
    #[arg(short, long, env = "FOUNDRY_QUALITY_THRESHOLD")]
    threshold: Option<i64>,
}

/// Execute `foundry export`
pub async fn execute(
    args: ExportArgs,
    dataset: &Path,
    config: &CliConfig,
    format: OutputFormat,
) -> CliResult<()> {
    let record_format: ExportFormat = args.format.parse()?;
    let threshold = config.quality_threshold(args.threshold)?;
    let out_dir = config.export_dir(args.out_dir);

    let store = JsonlExampleStore::new(dataset);
    let snapshot = store.load().await?;
    let manifest = write_export(&out_dir, &snapshot.examples, threshold, record_format).await?;

    if manifest.train_records == 0 && manifest.val_records == 0 {
        print_warning("No split examples to export; run `foundry split` first");
    } else {
        print_success(&format!(
            "Exported {} train and {} val records to {}",
            manifest.train_records,
            manifest.val_records,
            out_dir.display()
        ));
    }
    if manifest.skipped > 0 {
        print_warning(&format!(
            "Skipped {} examples without a usable conversation",
            manifest.skipped
        ));
    }

    if !matches!(format, OutputFormat::Table) {
        output::print_single(&manifest, format)?;
    }
    Ok(())
}
