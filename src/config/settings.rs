// Application settings
//
// Holds everything the chat session needs up front: the API credential,
// the corpus path, the model strategy, and generation/retry knobs.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::resolver::ModelStrategy;

/// Default proposal spreadsheet, project-relative.
pub const DEFAULT_DATA_FILE: &str = "정책제안_6개월.xlsx";

/// Default fixed model id.
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Clone)]
pub struct Config {
    /// Opaque credential for the backend; never logged.
    pub api_key: String,
    pub corpus_path: PathBuf,
    pub model: ModelStrategy,
    pub max_output_tokens: u32,
    pub temperature: Option<f32>,
    pub retry_enabled: bool,
}

impl Config {
    /// Config with defaults for everything but the credential.
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            corpus_path: PathBuf::from(DEFAULT_DATA_FILE),
            model: ModelStrategy::Fixed(DEFAULT_MODEL.to_string()),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: None,
            retry_enabled: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("API key is empty");
        }
        if let ModelStrategy::Fixed(id) = &self.model {
            if id.trim().is_empty() {
                bail!("fixed model id is empty");
            }
        }
        if self.max_output_tokens == 0 {
            bail!("max_output_tokens must be positive");
        }
        Ok(())
    }
}
