//! Global context for zazu operations.
//!
//! Provides centralized access to the working directory, the enclosing git
//! repository and the configuration files found there.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::core::{find_project_file, ProjectConfig};
use crate::util::config::{global_config_path, load_config, project_config_path, Config};
use crate::vcs::GitRepository;

/// Global context containing paths and output settings.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a context for the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a context for a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            verbose: false,
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Open the git repository enclosing the working directory.
    ///
    /// Returns the repository together with its working tree root.
    pub fn open_repository(&self) -> Result<(GitRepository, PathBuf)> {
        let repo = GitRepository::discover(&self.cwd)?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("repository at `{}` has no working tree", self.cwd.display()))?;
        Ok((repo, root))
    }

    /// Load the project file at the repository root.
    pub fn load_project(&self, root: &Path) -> Result<ProjectConfig> {
        let path = find_project_file(root)?;
        Ok(ProjectConfig::load(&path)?)
    }

    /// Load global and project user configuration.
    pub fn load_config(&self, root: &Path) -> Config {
        load_config(global_config_path().as_deref(), &project_config_path(root))
    }
}
