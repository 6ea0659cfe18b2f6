// Configuration loader
// Loads the API key and session settings from ~/.moa/config.toml or the
// GEMINI_API_KEY environment variable.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use super::settings::{Config, DEFAULT_MODEL};
use crate::resolver::{self, ModelStrategy};

/// Load configuration from the moa config file or environment.
pub fn load_config() -> Result<Config> {
    let env_key = std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.is_empty());

    if let Some(path) = config_file_path() {
        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return parse_config(&contents, env_key)
                .with_context(|| format!("invalid configuration in {}", path.display()));
        }
    }

    if let Some(api_key) = env_key {
        return Ok(Config::with_api_key(api_key));
    }

    bail!(
        "No configuration found. Create ~/.moa/config.toml with:\n\n\
        api_key = \"...\"\n\n\
        or set the environment variable:\n\
        export GEMINI_API_KEY=\"...\""
    );
}

fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".moa/config.toml"))
}

#[derive(Debug, Deserialize)]
struct TomlConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    data_file: Option<PathBuf>,
    #[serde(default)]
    model: Option<ModelTable>,
    #[serde(default)]
    max_output_tokens: Option<u32>,
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    retry: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ModelTable {
    #[serde(default)]
    mode: ModelMode,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    priority: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum ModelMode {
    #[default]
    Fixed,
    Auto,
}

/// Parse TOML contents into a Config, preferring the file's api_key over
/// the environment fallback. Split out of `load_config` so parsing is
/// testable without filesystem state.
fn parse_config(contents: &str, env_key: Option<String>) -> Result<Config> {
    let toml_config: TomlConfig =
        toml::from_str(contents).context("failed to parse config TOML")?;

    let api_key = match toml_config.api_key.filter(|k| !k.is_empty()).or(env_key) {
        Some(key) => key,
        None => bail!("config has no api_key and GEMINI_API_KEY is not set"),
    };

    let mut config = Config::with_api_key(api_key);

    if let Some(path) = toml_config.data_file {
        config.corpus_path = path;
    }
    if let Some(model) = toml_config.model {
        config.model = match model.mode {
            ModelMode::Fixed => {
                ModelStrategy::Fixed(model.id.unwrap_or_else(|| DEFAULT_MODEL.to_string()))
            }
            ModelMode::Auto => ModelStrategy::Auto {
                priority: model.priority.unwrap_or_else(resolver::default_priority),
            },
        };
    }
    if let Some(max_tokens) = toml_config.max_output_tokens {
        config.max_output_tokens = max_tokens;
    }
    if let Some(temperature) = toml_config.temperature {
        config.temperature = Some(temperature);
    }
    if let Some(retry) = toml_config.retry {
        config.retry_enabled = retry;
    }

    config.validate().context("configuration validation failed")?;

    Ok(config)
}
