// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "BULLETIN_READER_CONFIG";
const DEFAULT_PATH: &str = "config/reader.toml";

/// Reader-side knobs. Everything here belongs to the fetch capability, not
/// the store: the store has no timeout or retry policy of its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Base location the provider serves bulletins from.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/bulletins".to_string(),
            request_timeout_secs: 10,
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

impl ReaderConfig {
    /// Load from an explicit TOML path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading reader config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("parsing reader config from {}", path.display()))
    }

    /// Load using env var + fallbacks:
    /// 1) $BULLETIN_READER_CONFIG
    /// 2) config/reader.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_PATH} points to non-existent path"));
        }
        let default_p = PathBuf::from(DEFAULT_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Ok(Self::default())
    }
}
