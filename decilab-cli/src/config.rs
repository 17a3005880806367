//! Download configuration file.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// TOML config: API token plus the ticker universe to download.
///
/// ```toml
/// api_token = "..."
/// tickers = ["VFINX", "VTSMX"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    pub api_token: String,
    pub tickers: Vec<String>,
}

impl DownloadConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("parsing download config")
    }
}
