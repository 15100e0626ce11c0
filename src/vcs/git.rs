//! `VcsProvider` backed by libgit2.

use std::path::Path;

use git2::{Commit, Repository, StatusOptions};

use crate::vcs::{VcsError, VcsProvider};

/// Length of the abbreviated commit hash.
const SHORT_SHA_LEN: usize = 7;

/// A git repository opened from a working directory.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Find the repository containing `path`, searching upward.
    pub fn discover(path: &Path) -> Result<Self, VcsError> {
        let repo = Repository::discover(path).map_err(|source| VcsError::NotARepository {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(GitRepository { repo })
    }

    /// Root of the working tree (None for bare repositories).
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn head_commit(&self) -> Result<Commit<'_>, VcsError> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }
}

impl VcsProvider for GitRepository {
    fn head_short_sha(&self) -> Result<String, VcsError> {
        let mut id = self.head_commit()?.id().to_string();
        id.truncate(SHORT_SHA_LEN);
        Ok(id)
    }

    fn is_dirty(&self) -> Result<bool, VcsError> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    fn current_branch(&self) -> Result<String, VcsError> {
        if self.repo.head_detached()? {
            return Ok("HEAD".to_string());
        }
        let head = self.repo.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    fn tags_at_head(&self) -> Result<Vec<String>, VcsError> {
        let head = self.head_commit()?.id();
        let names = self.repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // Tags on trees or blobs never match a commit.
            if let Ok(commit) = reference.peel_to_commit() {
                if commit.id() == head {
                    tags.push(name.to_string());
                }
            }
        }
        tags.sort();

        tracing::debug!("tags at HEAD: {:?}", tags);
        Ok(tags)
    }
}
