//! The project model: components, goals and build specs.
//!
//! A component owns goals keyed by name; a goal owns one build spec per
//! architecture, produced by merging build overrides onto goal defaults.
//! Resolution turns a goal/arch/type request into a single [`BuildSpec`].

pub mod build_goal;
pub mod build_spec;
pub mod component;
pub mod errors;
pub mod merge;
pub mod project;

pub use build_goal::BuildGoal;
pub use build_spec::{BuildSpec, DEFAULT_BUILD_TYPE};
pub use component::ComponentConfiguration;
pub use errors::{ConfigError, ResolveError};
pub use project::{find_project_file, CiDocument, ProjectConfig, PROJECT_FILE_ALIAS, PROJECT_FILE_NAME};
