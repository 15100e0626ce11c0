//! CMake as the native build tool.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::builder::build_type::cmake_build_type;
use crate::builder::NativeBuildTool;
use crate::util::process::{find_cmake, ProcessBuilder};

/// Architectures supported out of the box.
pub const DEFAULT_ARCHES: &[&str] = &[
    "host",
    "x86_64-linux-gcc",
    "x86_32-linux-gcc",
    "arm32-linux-gnueabihf",
    "arm32-none-eabi",
    "x86_64-darwin-clang",
    "x86_32-win-msvc_2013",
    "x86_64-win-msvc_2013",
    "x86_32-win-msvc_2015",
    "x86_64-win-msvc_2015",
];

/// Drives `cmake` for configure and build.
#[derive(Debug, Clone, Default)]
pub struct CMakeTool {
    extra_arches: Vec<String>,
    toolchain_dir: Option<PathBuf>,
}

impl CMakeTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept additional architectures beyond [`DEFAULT_ARCHES`].
    pub fn with_extra_arches(mut self, arches: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_arches.extend(arches.into_iter().map(Into::into));
        self
    }

    /// Directory holding `<arch>.cmake` toolchain files.
    pub fn with_toolchain_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.toolchain_dir = dir;
        self
    }

    fn program(&self) -> Result<PathBuf> {
        find_cmake().ok_or_else(|| {
            anyhow!(
                "CMake not found\n\
                 \n\
                 CMake is required for builds without a script.\n\
                 Install CMake and ensure it's in your PATH."
            )
        })
    }

    /// The configure invocation for one arch/type.
    pub fn configure_command(
        &self,
        program: &Path,
        root_dir: &Path,
        build_dir: &Path,
        arch: &str,
        build_type: &str,
        vars: &BTreeMap<String, String>,
    ) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(program)
            .cwd(build_dir)
            .arg("-G")
            .arg(generator_for_arch(arch))
            .arg(format!("-DCMAKE_BUILD_TYPE={}", cmake_build_type(build_type)))
            .arg(format!("-DCPACK_SYSTEM_NAME={}", arch));

        if let Some(version) = vars.get("ZAZU_BUILD_VERSION") {
            cmd = cmd.arg(format!("-DCPACK_PACKAGE_VERSION={}", version));
        }

        if let Some(dir) = &self.toolchain_dir {
            let toolchain = dir.join(format!("{}.cmake", arch));
            if toolchain.exists() {
                cmd = cmd.arg(format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain.display()));
            }
        }

        for (key, value) in vars {
            cmd = cmd.arg(format!("-D{}={}", key, value));
        }

        cmd.arg(root_dir)
    }

    /// The build invocation for one target.
    pub fn build_command(
        &self,
        program: &Path,
        build_dir: &Path,
        build_type: &str,
        target: &str,
        verbose: bool,
    ) -> ProcessBuilder {
        let cmd = ProcessBuilder::new(program)
            .arg("--build")
            .arg(build_dir)
            .arg("--config")
            .arg(cmake_build_type(build_type))
            .arg("--target")
            .arg(target);

        if verbose {
            cmd.arg("--verbose")
        } else {
            cmd
        }
    }
}

impl NativeBuildTool for CMakeTool {
    fn known_arches(&self) -> Vec<String> {
        DEFAULT_ARCHES
            .iter()
            .map(|a| a.to_string())
            .chain(self.extra_arches.iter().cloned())
            .collect()
    }

    fn configure(
        &self,
        root_dir: &Path,
        build_dir: &Path,
        arch: &str,
        build_type: &str,
        vars: &BTreeMap<String, String>,
        verbose: bool,
    ) -> Result<i32> {
        tracing::info!("Configuring {} ({})", arch, build_type);
        let program = self.program()?;
        let cmd = self.configure_command(&program, root_dir, build_dir, arch, build_type, vars);
        cmd.run_for_code(verbose)
    }

    fn build(
        &self,
        build_dir: &Path,
        arch: &str,
        build_type: &str,
        target: &str,
        verbose: bool,
    ) -> Result<i32> {
        tracing::info!("Building `{}` for {} ({})", target, arch, build_type);
        let program = self.program()?;
        let cmd = self.build_command(&program, build_dir, build_type, target, verbose);
        cmd.run_for_code(verbose)
    }
}

/// CMake generator for an architecture.
pub fn generator_for_arch(arch: &str) -> String {
    let win64 = if arch.starts_with("x86_64") { " Win64" } else { "" };
    if arch.contains("win-msvc_2013") {
        format!("Visual Studio 12 2013{}", win64)
    } else if arch.contains("win-msvc_2015") {
        format!("Visual Studio 14 2015{}", win64)
    } else {
        "Unix Makefiles".to_string()
    }
}
