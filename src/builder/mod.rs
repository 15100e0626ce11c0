//! Build tool collaborators.
//!
//! A resolved build runs either through a [`NativeBuildTool`] (CMake by
//! default) or, when the build declares script steps, through a
//! [`ScriptRunner`] one step at a time.

pub mod build_type;
pub mod cmake;
pub mod script;

pub use build_type::{cmake_build_type, is_known_build_type, BUILD_TYPES};
pub use cmake::{CMakeTool, DEFAULT_ARCHES};
pub use script::ShellScriptRunner;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use thiserror::Error;

/// A native build system driven in two phases: configure, then build.
pub trait NativeBuildTool {
    /// Architectures this tool knows how to target.
    fn known_arches(&self) -> Vec<String>;

    /// Configure `build_dir` from the sources in `root_dir`; returns the exit code.
    fn configure(
        &self,
        root_dir: &Path,
        build_dir: &Path,
        arch: &str,
        build_type: &str,
        vars: &BTreeMap<String, String>,
        verbose: bool,
    ) -> Result<i32>;

    /// Build `target` in a configured `build_dir`; returns the exit code.
    fn build(
        &self,
        build_dir: &Path,
        arch: &str,
        build_type: &str,
        target: &str,
        verbose: bool,
    ) -> Result<i32>;
}

/// Runs a single shell command.
pub trait ScriptRunner {
    /// Run `command` in `cwd` with `env` added to the inherited environment;
    /// returns the exit code.
    fn run(&self, command: &str, cwd: &Path, env: &BTreeMap<String, String>) -> Result<i32>;
}

/// Fatal failures while building.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("arch `{arch}` not recognized, choose from: {}", .known.join(", "))]
    UnknownArch { arch: String, known: Vec<String> },

    #[error("build type `{build_type}` not recognized, choose from: {}", BUILD_TYPES.join(", "))]
    UnknownBuildType { build_type: String },

    #[error("error configuring build (exit code {code})")]
    ConfigureFailed { code: i32 },

    #[error("error building target `{target}` (exit code {code})")]
    BuildFailed { target: String, code: i32 },

    #[error("`{step}` exited with code {code}")]
    ScriptFailed { step: String, code: i32 },

    #[error("invalid ZAZU_BUILD_VERSION `{value}`")]
    InvalidVersion {
        value: String,
        #[source]
        source: semver::Error,
    },
}
