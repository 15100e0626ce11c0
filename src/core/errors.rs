//! Configuration and resolution error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to resolve a goal/arch request into a build spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("goal `{goal}` not found, available goals: {}", .available.join(", "))]
    GoalNotFound { goal: String, available: Vec<String> },

    #[error(
        "no arch specified for goal `{goal}`, but there are multiple arches available; \
         must specify one of: {}",
        .arches.join(", ")
    )]
    AmbiguousArch { goal: String, arches: Vec<String> },

    #[error("arch `{arch}` not found for goal `{goal}`, choose from: {}", .available.join(", "))]
    ArchNotFound {
        goal: String,
        arch: String,
        available: Vec<String>,
    },
}

/// Problems with the project file or the model built from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no project file found in `{}`\nhelp: create `zazu.yaml` at the repository root", .dir.display())]
    NotFound { dir: PathBuf },

    #[error(
        "both `{}` and `{}` exist; remove one of them",
        .primary.display(),
        .alias.display()
    )]
    Ambiguous { primary: PathBuf, alias: PathBuf },

    #[error("failed to read `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse config file `{}`", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("`{}` does not define any components", .path.display())]
    NoComponents { path: PathBuf },

    #[error("component `{name}` not found, available components: {}", .available.join(", "))]
    ComponentNotFound { name: String, available: Vec<String> },

    #[error("goal `{goal}` is defined more than once in component `{component}`")]
    DuplicateGoal { component: String, goal: String },

    #[error("arch `{arch}` is listed more than once for goal `{goal}`")]
    DuplicateArch { goal: String, arch: String },

    #[error("goal `{goal}` has no builds")]
    EmptyGoal { goal: String },

    #[error("invalid ci configuration: {message}")]
    InvalidCi { message: String },
}
