//! Version-control metadata used for version derivation.

pub mod git;

pub use git::GitRepository;

use std::path::PathBuf;

use thiserror::Error;

use crate::version::RepoState;

/// Failure querying the version-control system.
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("not a git repository: `{}`", .path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error(transparent)]
    Git(#[from] git2::Error),
}

/// Source of repository metadata.
pub trait VcsProvider {
    /// Abbreviated (7 character) hash of the HEAD commit.
    fn head_short_sha(&self) -> Result<String, VcsError>;

    /// Whether the working tree has uncommitted or untracked changes.
    fn is_dirty(&self) -> Result<bool, VcsError>;

    /// Current branch name, or `HEAD` when detached.
    fn current_branch(&self) -> Result<String, VcsError>;

    /// Names of all tags pointing exactly at HEAD.
    fn tags_at_head(&self) -> Result<Vec<String>, VcsError>;

    /// Collect everything version derivation needs in one go.
    fn repo_state(&self) -> Result<RepoState, VcsError> {
        Ok(RepoState {
            branch: self.current_branch()?,
            short_sha: self.head_short_sha()?,
            dirty: self.is_dirty()?,
            tags: self.tags_at_head()?,
        })
    }
}
