//! Foundry provider export.
//!
//! Renders the qualified examples of each split into the JSONL shape a
//! fine-tuning provider ingests, and writes `train.jsonl`, `val.jsonl` and
//! a `manifest.json` describing the export.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

mod error;
pub mod format;
pub mod writer;

pub use error::ExportError;
pub use format::{render_record, render_split, ChatMessage, ExportFormat, RenderedSplit};
pub use writer::{write_export, ExportManifest, MANIFEST_FILE, TRAIN_FILE, VAL_FILE};
