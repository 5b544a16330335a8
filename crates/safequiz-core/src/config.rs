//! Quiz configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::parser;

/// Top-level safequiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Custom question bank file; the built-in bank when unset.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Fixed RNG seed for a reproducible option order.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Shuffle options on every question.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

fn default_shuffle() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            bank: None,
            seed: None,
            shuffle: default_shuffle(),
        }
    }
}

impl QuizConfig {
    /// Load the configured bank, falling back to the built-in one.
    pub fn load_bank(&self) -> Result<QuestionBank> {
        match &self.bank {
            Some(path) => parser::parse_bank(path),
            None => QuestionBank::builtin(),
        }
    }
}

/// Expand `${VAR_NAME}` references in a string.
///
/// Substituted values are not expanded again, so a value that mentions
/// its own name cannot loop.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `safequiz.toml` in the current directory
/// 2. `~/.config/safequiz/config.toml`
///
/// Environment variable overrides: `SAFEQUIZ_SEED`, `SAFEQUIZ_BANK`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("safequiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a config document and expand `${VAR}` references in the bank path.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    let mut config: QuizConfig = toml::from_str(content)?;
    config.bank = config
        .bank
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));
    Ok(config)
}

fn apply_env_overrides(config: &mut QuizConfig) -> Result<()> {
    if let Ok(seed) = std::env::var("SAFEQUIZ_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("SAFEQUIZ_SEED is not a valid seed: '{seed}'"))?;
        config.seed = Some(seed);
    }

    if let Ok(bank) = std::env::var("SAFEQUIZ_BANK") {
        if !bank.trim().is_empty() {
            config.bank = Some(PathBuf::from(resolve_env_vars(&bank)));
        }
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("safequiz"))
}
