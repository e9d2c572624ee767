//! Export directory writer

use crate::format::{render_split, ExportFormat, RenderedSplit};
use crate::ExportError;
use chrono::{DateTime, Utc};
use foundry_types::{Example, QualityThreshold, Split};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TRAIN_FILE: &str = "train.jsonl";
pub const VAL_FILE: &str = "val.jsonl";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Description of one export, written next to the JSONL files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub created_at: DateTime<Utc>,
    pub format: ExportFormat,
    pub quality_threshold: QualityThreshold,
    pub train_records: usize,
    pub val_records: usize,
    pub skipped: usize,
}

/// Write both splits and the manifest into `dir`.
pub async fn write_export(
    dir: &Path,
    examples: &[Example],
    threshold: QualityThreshold,
    format: ExportFormat,
) -> Result<ExportManifest, ExportError> {
    let train = render_split(examples, Split::Train, threshold, format)?;
    let val = render_split(examples, Split::Val, threshold, format)?;

    tokio::fs::create_dir_all(dir).await?;
    write_lines(&dir.join(TRAIN_FILE), &train).await?;
    write_lines(&dir.join(VAL_FILE), &val).await?;

    let manifest = ExportManifest {
        created_at: Utc::now(),
        format,
        quality_threshold: threshold,
        train_records: train.lines.len(),
        val_records: val.lines.len(),
        skipped: train.skipped.len() + val.skipped.len(),
    };
    tokio::fs::write(
        dir.join(MANIFEST_FILE),
        serde_json::to_vec_pretty(&manifest)?,
    )
    .await?;

    tracing::info!(
        dir = %dir.display(),
        %format,
        train = manifest.train_records,
        val = manifest.val_records,
        skipped = manifest.skipped,
        "Export written"
    );
    Ok(manifest)
}

async fn write_lines(path: &Path, rendered: &RenderedSplit) -> Result<(), ExportError> {
    let mut body = rendered.lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    tokio::fs::write(path, body).await?;
    Ok(())
}
