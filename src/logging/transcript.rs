// Session transcript logger
//
// Appends one JSONL entry per question/answer exchange. Write-only
// observability: failures here are logged and never interrupt the chat.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A single logged exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Unique ID for this entry
    pub id: String,

    /// When this exchange occurred
    pub timestamp: DateTime<Utc>,

    /// User's question
    pub question: String,

    /// Assistant's answer, or the error message shown in its place
    pub answer: String,

    /// Which backend model answered
    pub model: String,

    /// Whether the backend call succeeded
    pub ok: bool,
}

impl TranscriptEntry {
    pub fn new(question: String, answer: String, model: String, ok: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            question,
            answer,
            model,
            ok,
        }
    }
}

pub struct TranscriptLogger {
    path: PathBuf,
}

impl TranscriptLogger {
    /// Create a logger writing to a fresh session file under `dir`.
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;

        let file_name = format!("session-{}.jsonl", Utc::now().format("%Y%m%d-%H%M%S"));
        Ok(Self {
            path: dir.join(file_name),
        })
    }

    /// Append one entry as a JSON line.
    pub fn log(&self, entry: &TranscriptEntry) -> Result<()> {
        let line = serde_json::to_string(entry).context("failed to serialize entry")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;

        writeln!(file, "{}", line)?;
        tracing::debug!("Logged transcript entry to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
