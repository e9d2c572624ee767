//! Flat-file JSONL store.
//!
//! One example per line. The revision of a file is the BLAKE3 hash of its
//! bytes, so any writer (including a text editor) invalidates outstanding
//! snapshots. Writes go to a sibling temp file that is renamed over the
//! dataset, leaving either the old or the new file on disk.

use crate::model::{ensure_unique_ids, ExampleSnapshot, Revision};
use crate::traits::ExampleStore;
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use foundry_types::Example;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// JSONL-backed example store.
pub struct JsonlExampleStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlExampleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_bytes(&self) -> StorageResult<Vec<u8>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_bytes(&self, bytes: &[u8]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn parse(&self, bytes: &[u8]) -> StorageResult<Vec<Example>> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            StorageError::Serialization(format!("{}: not valid UTF-8: {}", self.path.display(), e))
        })?;

        let mut examples = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let example: Example = serde_json::from_str(line).map_err(|e| {
                StorageError::Serialization(format!(
                    "{}:{}: {}",
                    self.path.display(),
                    line_no + 1,
                    e
                ))
            })?;
            examples.push(example);
        }

        ensure_unique_ids(&examples)?;
        Ok(examples)
    }
}

fn revision_of(bytes: &[u8]) -> Revision {
    Revision::new(blake3::hash(bytes).to_hex().to_string())
}

fn render(examples: &[Example]) -> StorageResult<Vec<u8>> {
    let mut out = Vec::new();
    for example in examples {
        serde_json::to_writer(&mut out, example)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        out.push(b'\n');
    }
    Ok(out)
}

#[async_trait]
impl ExampleStore for JsonlExampleStore {
    async fn load(&self) -> StorageResult<ExampleSnapshot> {
        let bytes = self.read_bytes().await?;
        let examples = self.parse(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            examples = examples.len(),
            "Loaded dataset"
        );
        Ok(ExampleSnapshot {
            examples,
            revision: revision_of(&bytes),
        })
    }

    async fn commit(&self, expected: &Revision, examples: Vec<Example>) -> StorageResult<Revision> {
        ensure_unique_ids(&examples)?;
        let _guard = self.write_lock.lock().await;

        let current = revision_of(&self.read_bytes().await?);
        if &current != expected {
            return Err(StorageError::Conflict(format!(
                "{} changed since it was read",
                self.path.display()
            )));
        }

        let bytes = render(&examples)?;
        self.write_bytes(&bytes).await?;
        tracing::debug!(
            path = %self.path.display(),
            examples = examples.len(),
            "Committed dataset"
        );
        Ok(revision_of(&bytes))
    }

    async fn append(&self, examples: Vec<Example>) -> StorageResult<Revision> {
        ensure_unique_ids(&examples)?;
        let _guard = self.write_lock.lock().await;

        let mut bytes = self.read_bytes().await?;
        let existing = self.parse(&bytes)?;
        let ids: HashSet<_> = existing.iter().map(|e| &e.id).collect();
        if let Some(dup) = examples.iter().find(|e| ids.contains(&e.id)) {
            return Err(StorageError::Conflict(format!(
                "example {} already exists",
                dup.id
            )));
        }

        if !bytes.is_empty() && !bytes.ends_with(b"\n") {
            bytes.push(b'\n');
        }
        bytes.extend(render(&examples)?);
        self.write_bytes(&bytes).await?;
        Ok(revision_of(&bytes))
    }
}
