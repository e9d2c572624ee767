//! Import command

use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success, print_warning};
use clap::Args;
use foundry_store::{ExampleStore, JsonlExampleStore};
use foundry_types::{Example, ExampleId};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Arguments for `foundry import`
#[derive(Args)]
pub struct ImportArgs {
    /// JSONL file with one example per line
    file: PathBuf,
}

/// Parsed import batch
#[derive(Debug)]
struct ImportBatch {
    examples: Vec<Example>,
    /// Records that arrived with a split label, which was dropped
    split_dropped: usize,
}

fn parse_records(contents: &str, source: &Path) -> CliResult<ImportBatch> {
    let mut examples = Vec::new();
    let mut split_dropped = 0;

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let location = format!("{}:{}", source.display(), index + 1);

        let value: Value = serde_json::from_str(line)
            .map_err(|e| CliError::InvalidInput(format!("{location}: {e}")))?;
        let mut record = match value {
            Value::Object(map) => map,
            _ => {
                return Err(CliError::InvalidInput(format!(
                    "{location}: expected a JSON object"
                )))
            }
        };
        if !record.contains_key("id") {
            record.insert("id".into(), serde_json::to_value(ExampleId::generate())?);
        }
        // Imported examples always start unassigned.
        if record.remove("split").is_some_and(|v| !v.is_null()) {
            split_dropped += 1;
        }

        let example: Example = serde_json::from_value(Value::Object(record))
            .map_err(|e| CliError::InvalidInput(format!("{location}: {e}")))?;
        examples.push(example);
    }

    Ok(ImportBatch {
        examples,
        split_dropped,
    })
}

/// Execute `foundry import`
pub async fn import(args: ImportArgs, dataset: &Path) -> CliResult<()> {
    let contents = tokio::fs::read_to_string(&args.file).await?;
    let batch = parse_records(&contents, &args.file)?;

    if batch.examples.is_empty() {
        print_info(&format!("No examples in {}", args.file.display()));
        return Ok(());
    }
    if batch.split_dropped > 0 {
        tracing::warn!(count = batch.split_dropped, "Dropped split labels from imported records");
        print_warning(&format!(
            "Ignored split labels on {} imported examples",
            batch.split_dropped
        ));
    }

    let count = batch.examples.len();
    let store = JsonlExampleStore::new(dataset);
    store.append(batch.examples).await?;
    print_success(&format!("Imported {} examples into {}", count, dataset.display()));
    Ok(())
}
