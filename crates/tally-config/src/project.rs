//! Project Configuration (tally.toml)

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Report modes accepted in `report.mode`
pub const VALID_MODES: &[&str] = &["console", "graphical"];

/// Project configuration from tally.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Report settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,
}

/// `[report]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// "console" or "graphical"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Emit debug logs while running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Colored console output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(mode) = self.report.as_ref().and_then(|r| r.mode.as_deref()) {
            validate_mode("report.mode", mode)?;
        }
        Ok(())
    }

    /// `[report]` section, created on first write
    pub fn report_mut(&mut self) -> &mut ReportConfig {
        self.report.get_or_insert_with(ReportConfig::default)
    }
}

pub(crate) fn validate_mode(field: &str, mode: &str) -> ConfigResult<()> {
    if VALID_MODES.contains(&mode.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!(
                "unknown mode '{}' (expected one of: {})",
                mode,
                VALID_MODES.join(", ")
            ),
        })
    }
}
