//! Zazu - a development workflow tool for multi-architecture projects
//!
//! This crate provides the library behind the `zazu` binary: the project
//! model and build-spec resolution, version derivation from git state, and
//! the build orchestration that drives CMake or script steps and publishes
//! artifacts to a CI server.

pub mod builder;
pub mod ci;
pub mod core;
pub mod ops;
pub mod util;
pub mod vcs;
pub mod version;

/// Test doubles and fixtures for zazu unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildGoal, BuildSpec, ComponentConfiguration, ProjectConfig};
pub use util::context::GlobalContext;
pub use version::Version;
