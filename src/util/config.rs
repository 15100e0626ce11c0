//! User configuration for zazu.
//!
//! Two locations are read:
//! - Global: `~/.zazu/config.toml` - user-wide defaults
//! - Project: `<repo>/.zazu/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default directory (relative to the repository root) for native builds.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// zazu configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub build: BuildConfig,
    pub cmake: CMakeConfig,
    pub ci: CiConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Root of native build directories, relative to the repository
    pub build_dir: Option<String>,
}

/// CMake-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CMakeConfig {
    /// Architectures accepted in addition to the built-in set
    pub extra_arches: Vec<String>,

    /// Directory containing `<arch>.cmake` toolchain files
    pub toolchain_dir: Option<PathBuf>,
}

/// Build server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CiConfig {
    /// `teamcity` or `none`; unset means detect from the environment
    pub server: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults when missing or broken.
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
        if other.build.build_dir.is_some() {
            self.build.build_dir = other.build.build_dir;
        }
        if !other.cmake.extra_arches.is_empty() {
            self.cmake.extra_arches = other.cmake.extra_arches;
        }
        if other.cmake.toolchain_dir.is_some() {
            self.cmake.toolchain_dir = other.cmake.toolchain_dir;
        }
        if other.ci.server.is_some() {
            self.ci.server = other.ci.server;
        }
    }

    /// Directory name for native builds.
    pub fn build_dir(&self) -> &str {
        self.build.build_dir.as_deref().unwrap_or(DEFAULT_BUILD_DIR)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.zazu/config.toml)
/// 2. Global config (~/.zazu/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global zazu config directory (~/.zazu).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".zazu"))
}

/// Get the global config path (~/.zazu/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.zazu/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".zazu").join("config.toml")
}
