//! Turning branch, commit and tag state into a [`Version`].

use serde::Serialize;

use crate::version::Version;

/// Branch prefixes whose remainder names the upcoming release.
const RELEASE_BRANCH_PREFIXES: &[&str] = &["release/", "hotfix/"];

/// Repository metadata that a version is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoState {
    /// Current branch name (`HEAD` when detached)
    pub branch: String,

    /// Abbreviated commit hash of HEAD (7 hex characters)
    pub short_sha: String,

    /// Whether the working tree has uncommitted changes
    pub dirty: bool,

    /// Tags pointing exactly at HEAD
    pub tags: Vec<String>,
}

/// The commit label used in build metadata, e.g. `g1a2b3c4-dirty`.
pub fn sha_label(short_sha: &str, dirty: bool) -> String {
    if dirty {
        format!("g{}-dirty", short_sha)
    } else {
        format!("g{}", short_sha)
    }
}

/// Convert a tag such as `R4.1` or `v2` into a release version.
///
/// A single leading `r`/`v` (any case) is dropped. Missing or unparsable
/// components become 0; anything after the third component is ignored.
pub fn tag_to_version(tag: Option<&str>) -> Version {
    let text = tag.unwrap_or("");
    let text = text.strip_prefix(&['r', 'v', 'R', 'V'][..]).unwrap_or(text);

    let mut components = text.split('.').map(leading_number);
    let major = components.next().unwrap_or(0);
    let minor = components.next().unwrap_or(0);
    let patch = components.next().unwrap_or(0);

    Version::new(major, minor, patch)
}

fn leading_number(component: &str) -> u64 {
    let end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    component[..end].parse().unwrap_or(0)
}

/// Replace characters that are awkward in version identifiers with `-`.
pub fn sanitize_branch_name(branch: &str) -> String {
    branch.replace(['/', '_'], "-")
}

/// Build the version for one candidate tag (or for no tag at all).
///
/// A tag yields a true release. Without a tag, `release/X` and `hotfix/X`
/// branches yield a prerelease of `X`, and every other branch a prerelease
/// of `0.0.0`; the prerelease is the build number.
pub fn version_from_tag(branch: &str, build_number: u64, tag: Option<&str>, sha: &str) -> Version {
    let build = vec![
        "sha".to_string(),
        sha.to_string(),
        "build".to_string(),
        build_number.to_string(),
        "branch".to_string(),
        sanitize_branch_name(branch),
    ];

    let version = match tag {
        Some(tag) => tag_to_version(Some(tag)),
        None => {
            let upcoming = RELEASE_BRANCH_PREFIXES
                .iter()
                .find_map(|prefix| branch.strip_prefix(prefix));
            match upcoming {
                Some(name) => tag_to_version(Some(name)),
                None => Version::new(0, 0, 0),
            }
            .with_prerelease(vec![build_number.to_string()])
        }
    };

    version.with_build(build)
}

/// Derive the version for a repository state and build number.
///
/// When several tags point at HEAD, the highest resulting version wins.
pub fn derive_version(state: &RepoState, build_number: u64) -> Version {
    let sha = sha_label(&state.short_sha, state.dirty);

    state
        .tags
        .iter()
        .map(|tag| version_from_tag(&state.branch, build_number, Some(tag), &sha))
        .max()
        .unwrap_or_else(|| version_from_tag(&state.branch, build_number, None, &sha))
}
