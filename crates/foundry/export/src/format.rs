//! Provider record formats

use crate::ExportError;
use foundry_types::{Example, ExampleId, QualityThreshold, Split};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Shape of one exported JSONL line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `{"messages": [{"role", "content"}, ...]}`
    #[default]
    Chat,
    /// `{"prompt": ..., "completion": ...}`
    Completion,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Chat => f.write_str("chat"),
            ExportFormat::Completion => f.write_str("completion"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(ExportFormat::Chat),
            "completion" => Ok(ExportFormat::Completion),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

/// Lines rendered for one split
#[derive(Debug, Clone, Default)]
pub struct RenderedSplit {
    pub lines: Vec<String>,
    /// Examples in the split without usable content
    pub skipped: Vec<ExampleId>,
}

/// Render one example, or `None` if its payload has no usable content.
pub fn render_record(example: &Example, format: ExportFormat) -> Option<Value> {
    let messages = conversation(&example.payload)?;
    match format {
        ExportFormat::Chat => Some(json!({ "messages": messages })),
        ExportFormat::Completion => {
            let answer = messages.iter().rposition(|m| m.role == "assistant")?;
            let prompt = messages[..answer].iter().rev().find(|m| m.role == "user")?;
            Some(json!({
                "prompt": prompt.content,
                "completion": messages[answer].content,
            }))
        }
    }
}

/// Render every qualified example labelled `split`.
pub fn render_split(
    examples: &[Example],
    split: Split,
    threshold: QualityThreshold,
    format: ExportFormat,
) -> Result<RenderedSplit, ExportError> {
    let mut rendered = RenderedSplit::default();

    for example in examples
        .iter()
        .filter(|e| e.split == Some(split) && e.is_qualified(threshold))
    {
        match render_record(example, format) {
            Some(record) => rendered.lines.push(serde_json::to_string(&record)?),
            None => {
                tracing::warn!(id = %example.id, %split, "Skipping example without usable content");
                rendered.skipped.push(example.id.clone());
            }
        }
    }

    Ok(rendered)
}

/// Conversation from a `messages` array, or from `system`/`input`/`output`.
/// Needs at least one assistant turn.
fn conversation(payload: &Map<String, Value>) -> Option<Vec<ChatMessage>> {
    let messages = match payload.get("messages") {
        Some(raw) => serde_json::from_value::<Vec<ChatMessage>>(raw.clone()).ok()?,
        None => {
            let input = payload.get("input")?.as_str()?;
            let output = payload.get("output")?.as_str()?;
            let mut messages = Vec::with_capacity(3);
            if let Some(system) = payload.get("system").and_then(Value::as_str) {
                messages.push(ChatMessage::new("system", system));
            }
            messages.push(ChatMessage::new("user", input));
            messages.push(ChatMessage::new("assistant", output));
            messages
        }
    };

    messages
        .iter()
        .any(|m| m.role == "assistant")
        .then_some(messages)
}
