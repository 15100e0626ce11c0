//! High-level operations.
//!
//! This module contains the implementation of zazu commands. Operations take
//! their collaborators as trait objects and leave rendering to the binary.

pub mod zazu_build;
pub mod zazu_version;

pub use zazu_build::{
    add_version_vars, plan_build, run_build, BuildContext, BuildPlan, BuildRequest, Tools,
    BUILD_NUMBER_VAR, BUILD_VERSION_PEP440_VAR, BUILD_VERSION_VAR,
};
pub use zazu_version::{describe_version, VersionInfo};
