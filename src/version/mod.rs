//! Version derivation from repository state.
//!
//! A [`Version`] is computed from the branch, commit, dirty flag and tags at
//! HEAD together with a build counter, and rendered either as a semantic
//! version or as a packaging-index (PEP 440 style) version.

pub mod derive;
pub mod number;

pub use derive::{
    derive_version, sanitize_branch_name, sha_label, tag_to_version, version_from_tag, RepoState,
};
pub use number::Version;
