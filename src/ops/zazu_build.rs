//! Implementation of `zazu build`.
//!
//! Building happens in two steps. [`plan_build`] resolves the requested goal
//! into a [`BuildSpec`] and computes the full variable set, including the
//! version variables. [`run_build`] then dispatches to the native build tool
//! or the script runner and finally hands the artifacts to the build server.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::{is_known_build_type, BuildError, NativeBuildTool, ScriptRunner};
use crate::ci::BuildServer;
use crate::core::{BuildSpec, ProjectConfig, ResolveError};
use crate::util::args::parse_key_value_pairs;
use crate::util::fs::{ensure_dir, match_artifacts};
use crate::vcs::VcsProvider;
use crate::version::{derive_version, Version};

/// Semantic version of the build; set it to skip version derivation.
pub const BUILD_VERSION_VAR: &str = "ZAZU_BUILD_VERSION";

/// The build counter.
pub const BUILD_NUMBER_VAR: &str = "ZAZU_BUILD_NUMBER";

/// The packaging-index rendering of the build version.
pub const BUILD_VERSION_PEP440_VAR: &str = "ZAZU_BUILD_VERSION_PEP440";

/// What the user asked to build.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Goal name from the project file, or a raw native build target
    pub goal: String,

    /// Architecture; may be omitted when the goal has only one
    pub arch: Option<String>,

    /// Build type replacing the configured one
    pub build_type: Option<String>,

    /// Build counter
    pub build_number: u64,

    /// Free-form `key=value` arguments
    pub extra_args: Vec<String>,

    /// Component to build from (defaults to the first)
    pub component: Option<String>,
}

/// Where and how to run a build.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Repository root
    pub root: PathBuf,

    /// Parent directory of native build directories
    pub build_dir: PathBuf,

    /// Stream tool output and echo script steps
    pub verbose: bool,
}

impl BuildContext {
    /// Native build directory for an arch/type pair.
    pub fn native_build_dir(&self, arch: &str, build_type: &str) -> PathBuf {
        self.build_dir.join(format!("{}-{}", arch, build_type))
    }
}

/// External tools a build talks to.
pub struct Tools<'a> {
    pub native: &'a dyn NativeBuildTool,
    pub scripts: &'a dyn ScriptRunner,
    pub build_server: &'a dyn BuildServer,
}

/// A resolved build ready to run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub spec: BuildSpec,

    /// Variables passed to the build: goal vars, CLI pairs and version vars
    pub vars: BTreeMap<String, String>,
}

/// Resolve a request into a build plan.
pub fn plan_build(
    project: &ProjectConfig,
    request: &BuildRequest,
    vcs: &dyn VcsProvider,
) -> Result<BuildPlan> {
    let component = project.component(request.component.as_deref())?;

    let resolved = component.resolve(
        &request.goal,
        request.arch.as_deref(),
        request.build_type.as_deref(),
    );

    let spec = match resolved {
        Ok(spec) => {
            if request.arch.is_none() {
                tracing::info!("No arch specified, but there is only one ({})", spec.arch());
            }
            spec
        }
        Err(ResolveError::GoalNotFound { goal, .. }) => {
            tracing::warn!(
                "goal `{}` is not defined in component `{}`, building it as a native target",
                goal,
                component.name()
            );
            fallback_spec(goal, request)
        }
        Err(e) => return Err(e.into()),
    };

    let mut vars = spec.vars().clone();
    vars.extend(parse_key_value_pairs(&request.extra_args)?);

    let version = add_version_vars(&mut vars, request.build_number, vcs)?;
    tracing::debug!("build version {}", version);

    Ok(BuildPlan { spec, vars })
}

/// A spec for a goal the project file does not define.
fn fallback_spec(goal: String, request: &BuildRequest) -> BuildSpec {
    let mut spec = BuildSpec::new(goal);
    if let Some(arch) = &request.arch {
        spec = spec.with_arch(arch.as_str());
    }
    if let Some(build_type) = &request.build_type {
        spec = spec.with_build_type(build_type.as_str());
    }
    spec
}

/// Insert the version variables into `vars`.
///
/// A `ZAZU_BUILD_VERSION` already present is used as-is (it must be a valid
/// semantic version); otherwise the version is derived from the repository.
pub fn add_version_vars(
    vars: &mut BTreeMap<String, String>,
    build_number: u64,
    vcs: &dyn VcsProvider,
) -> Result<Version> {
    let version = match vars.get(BUILD_VERSION_VAR) {
        Some(supplied) => Version::parse(supplied).map_err(|source| BuildError::InvalidVersion {
            value: supplied.clone(),
            source,
        })?,
        None => {
            let state = vcs
                .repo_state()
                .context("failed to read repository state")?;
            let version = derive_version(&state, build_number);
            vars.insert(BUILD_VERSION_VAR.to_string(), version.to_semver_string());
            version
        }
    };

    vars.insert(BUILD_NUMBER_VAR.to_string(), build_number.to_string());
    vars.insert(BUILD_VERSION_PEP440_VAR.to_string(), version.to_pep440_string());

    Ok(version)
}

/// Execute a plan and publish its artifacts.
pub fn run_build(plan: &BuildPlan, ctx: &BuildContext, tools: &Tools<'_>) -> Result<()> {
    match plan.spec.script() {
        Some(steps) => script_build(steps, &plan.vars, ctx, tools.scripts)?,
        None => native_build(&plan.spec, &plan.vars, ctx, tools.native)?,
    }

    publish_artifacts(plan.spec.artifacts(), &ctx.root, tools.build_server);
    Ok(())
}

fn native_build(
    spec: &BuildSpec,
    vars: &BTreeMap<String, String>,
    ctx: &BuildContext,
    tool: &dyn NativeBuildTool,
) -> Result<()> {
    let known = tool.known_arches();
    if !known.iter().any(|a| a == spec.arch()) {
        return Err(BuildError::UnknownArch {
            arch: spec.arch().to_string(),
            known,
        }
        .into());
    }
    if !is_known_build_type(spec.build_type()) {
        return Err(BuildError::UnknownBuildType {
            build_type: spec.build_type().to_string(),
        }
        .into());
    }

    let build_dir = ctx.native_build_dir(spec.arch(), spec.build_type());
    ensure_dir(&build_dir)?;

    let code = tool.configure(
        &ctx.root,
        &build_dir,
        spec.arch(),
        spec.build_type(),
        vars,
        ctx.verbose,
    )?;
    if code != 0 {
        return Err(BuildError::ConfigureFailed { code }.into());
    }

    let code = tool.build(
        &build_dir,
        spec.arch(),
        spec.build_type(),
        spec.goal(),
        ctx.verbose,
    )?;
    if code != 0 {
        return Err(BuildError::BuildFailed {
            target: spec.goal().to_string(),
            code,
        }
        .into());
    }

    Ok(())
}

fn script_build(
    steps: &[String],
    vars: &BTreeMap<String, String>,
    ctx: &BuildContext,
    runner: &dyn ScriptRunner,
) -> Result<()> {
    for step in steps {
        if ctx.verbose {
            tracing::info!("{}", step);
        } else {
            tracing::debug!("running script step `{}`", step);
        }

        let code = runner.run(step, &ctx.root, vars)?;
        if code != 0 {
            return Err(BuildError::ScriptFailed {
                step: step.clone(),
                code,
            }
            .into());
        }
    }
    Ok(())
}

/// Hand artifacts to the build server; failures are logged, never fatal.
fn publish_artifacts(artifacts: &[String], root: &Path, server: &dyn BuildServer) {
    if artifacts.is_empty() {
        return;
    }

    for pattern in artifacts {
        match match_artifacts(root, pattern) {
            Ok(found) if found.is_empty() => {
                tracing::warn!("artifact pattern `{}` matched no files", pattern)
            }
            Ok(found) => tracing::debug!("artifact `{}`: {} file(s)", pattern, found.len()),
            Err(e) => tracing::warn!("{:#}", e),
        }
    }

    if let Err(e) = server.publish_artifacts(artifacts) {
        tracing::warn!("failed to publish artifacts to {}: {:#}", server.name(), e);
    }
}
