//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.uuid-build/config.toml` - User-wide defaults
//! - Project: `<base-path>/.uuid-build/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::options::BuildOptionSet;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".uuid-build";

/// Default prefix of the library's own CMake options.
pub const DEFAULT_FEATURE_PREFIX: &str = "UUID";

/// Orchestrator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Prefix for `<P>_BUILD_TESTS` and `<P>_ENABLE_INSTALL`
    pub feature_prefix: Option<String>,

    /// Parallel jobs for `cmake --build` (None = let the generator decide)
    pub jobs: Option<usize>,

    /// Extra named options passed to every configuration pass
    pub options: BuildOptionSet,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.feature_prefix.is_some() {
            self.build.feature_prefix = other.build.feature_prefix;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        // Options merge key by key
        self.build.options.merge(&other.build.options);
    }

    /// The configured feature prefix, or the default.
    pub fn feature_prefix(&self) -> &str {
        self.build
            .feature_prefix
            .as_deref()
            .unwrap_or(DEFAULT_FEATURE_PREFIX)
    }
}

/// Get the global config path (~/.uuid-build/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|b| b.home_dir().join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Get the project config path (<project>/.uuid-build/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join("config.toml")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}
