//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/alloctree/alloctree.toml`
//! 3. Local config: `<project_dir>/.alloctree.toml`
//! 4. Environment variables: `ALLOCTREE_*` prefix (`__` separates nesting)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// How trees are rendered in the terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Show node ids next to labels
    pub show_ids: bool,
    /// Show the baseline column
    pub show_baseline: bool,
    /// Colorize variances (NO_COLOR still wins)
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_ids: true,
            show_baseline: true,
            color: true,
        }
    }
}

/// Raw display settings for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplaySettings {
    pub show_ids: Option<bool>,
    pub show_baseline: Option<bool>,
    pub color: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub seed: Option<PathBuf>,
    pub display: RawDisplaySettings,
}

impl DisplaySettings {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawDisplaySettings) -> Self {
        Self {
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
            show_baseline: overlay.show_baseline.unwrap_or(self.show_baseline),
            color: overlay.color.unwrap_or(self.color),
        }
    }
}

/// Unified configuration for alloctree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Seed file holding the initial allocation (default: built-in sample)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PathBuf>,
    /// Rendering options
    pub display: DisplaySettings,
}

/// Get the XDG config directory for alloctree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "alloctree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("alloctree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".alloctree.toml")
}

/// Expand `~`, `$VAR` and `${VAR}`; unexpandable input is returned as is.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    ///
    /// A relative `seed` in a config file is resolved against `base_dir`,
    /// the directory holding that file.
    pub fn merge_with(&self, overlay: &RawSettings, base_dir: Option<&Path>) -> Self {
        let seed = overlay
            .seed
            .as_ref()
            .map(|seed| {
                let expanded = PathBuf::from(expand_env_vars(&seed.to_string_lossy()));
                match base_dir {
                    Some(dir) if expanded.is_relative() => dir.join(expanded),
                    _ => expanded,
                }
            })
            .or_else(|| self.seed.clone());

        Self {
            seed,
            display: self.display.merge(&overlay.display),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory holding `.alloctree.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw, global_path.parent());
            }
        }

        // 3. Project-local config
        if let Some(project) = project_dir {
            let local_path = local_config_path(project);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw, Some(project));
            }
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply ALLOCTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ALLOCTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("seed") {
            settings.seed = Some(PathBuf::from(expand_env_vars(&val)));
        }
        if let Ok(val) = config.get_bool("display.show_ids") {
            settings.display.show_ids = val;
        }
        if let Ok(val) = config.get_bool("display.show_baseline") {
            settings.display.show_baseline = val;
        }
        if let Ok(val) = config.get_bool("display.color") {
            settings.display.color = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# alloctree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/alloctree/alloctree.toml
#   Local:  <project_dir>/.alloctree.toml
#   Env:    ALLOCTREE_* environment variables, e.g. ALLOCTREE_DISPLAY__COLOR=false

# Seed file with the initial allocation (default: built-in sample).
# Relative paths are resolved against the directory of this file.
# seed = "budget.toml"

[display]
# show_ids = true
# show_baseline = true
# color = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
