//! Implementation of `zazu version`.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::vcs::VcsProvider;
use crate::version::{derive_version, sha_label};

/// The version of the current checkout in both renderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub semver: String,
    pub pep440: String,
    pub build_number: u64,
    pub branch: String,
    pub sha: String,
    pub dirty: bool,
}

/// Derive the version of the checkout `vcs` describes.
pub fn describe_version(vcs: &dyn VcsProvider, build_number: u64) -> Result<VersionInfo> {
    let state = vcs
        .repo_state()
        .context("failed to read repository state")?;
    let version = derive_version(&state, build_number);

    Ok(VersionInfo {
        semver: version.to_semver_string(),
        pep440: version.to_pep440_string(),
        build_number,
        sha: sha_label(&state.short_sha, state.dirty),
        branch: state.branch,
        dirty: state.dirty,
    })
}
