pub mod config;
pub mod sample;

use anyhow::{Context, Result};
use std::path::Path;
use tally_config::{Config, ConfigLoader};

/// Load tally.toml (searching upward from `dir`) plus environment overrides
pub fn load_config(dir: &Path) -> Result<Config> {
    ConfigLoader::new()
        .load_from_directory(dir)
        .with_context(|| format!("failed to load configuration from {}", dir.display()))
}
