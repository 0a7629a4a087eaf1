//! Configuration Loader
//!
//! Finds `tally.toml` and applies environment overrides on top of it.

use crate::project::{validate_mode, ProjectConfig};
use crate::{ConfigResult, CONFIG_FILE};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Precedence, lowest first:
/// 1. Defaults
/// 2. Project config (`tally.toml`)
/// 3. Environment variables (`TALLY_*`, `NO_COLOR`)
/// 4. CLI flags (handled by caller)
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Skip environment overrides
    ignore_env: bool,
}

/// Merged configuration result
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    /// Project configuration with overrides applied
    pub project: ProjectConfig,

    /// Directory where tally.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { ignore_env: false }
    }

    /// Do not read `TALLY_*` / `NO_COLOR` from the environment
    pub fn without_env(mut self) -> Self {
        self.ignore_env = true;
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find tally.toml. Without one, the
    /// defaults (plus environment overrides) are returned.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project) = self.find_project_config(start_dir)?;
        let project = self.apply_env_overrides(project)?;

        Ok(Config {
            project,
            project_root,
        })
    }

    /// Load configuration from a specific tally.toml
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let project = ProjectConfig::load_from_file(config_path)?;
        let project = self.apply_env_overrides(project)?;

        Ok(Config {
            project,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Returns (project_root, project_config)
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        // A relative start such as "." has no parents to walk; anchor it first.
        let mut current = if start_dir.is_absolute() {
            start_dir.to_path_buf()
        } else {
            let joined = env::current_dir()?.join(start_dir);
            joined.canonicalize().unwrap_or(joined)
        };

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "loading project config");
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    tracing::debug!(start = %start_dir.display(), "no tally.toml found, using defaults");
                    return Ok((None, ProjectConfig::default()));
                }
            }
        }
    }

    /// Environment variables:
    /// - `TALLY_MODE=console|graphical`
    /// - `TALLY_VERBOSE=true|1|yes`
    /// - `TALLY_NO_COLOR=true|1|yes`, or `NO_COLOR` set to anything non-empty
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if self.ignore_env {
            return Ok(config);
        }

        if let Ok(mode) = env::var("TALLY_MODE") {
            validate_mode("TALLY_MODE", &mode)?;
            config.report_mut().mode = Some(mode.to_ascii_lowercase());
        }

        if let Ok(verbose) = env::var("TALLY_VERBOSE") {
            config.report_mut().verbose = Some(is_truthy(&verbose));
        }

        if let Ok(no_color) = env::var("TALLY_NO_COLOR") {
            if is_truthy(&no_color) {
                config.report_mut().color = Some(false);
            }
        }

        if env::var("NO_COLOR").map_or(false, |v| !v.is_empty()) {
            config.report_mut().color = Some(false);
        }

        Ok(config)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

impl Config {
    /// Effective report mode (project > default "console")
    pub fn mode(&self) -> &str {
        self.project
            .report
            .as_ref()
            .and_then(|r| r.mode.as_deref())
            .unwrap_or("console")
    }

    pub fn verbose(&self) -> bool {
        self.project
            .report
            .as_ref()
            .and_then(|r| r.verbose)
            .unwrap_or(false)
    }

    pub fn color(&self) -> bool {
        self.project
            .report
            .as_ref()
            .and_then(|r| r.color)
            .unwrap_or(true)
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if a tally.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
