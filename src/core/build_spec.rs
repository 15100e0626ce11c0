//! The fully-resolved parameters of one buildable unit.

use std::collections::BTreeMap;

use serde::Serialize;

/// Build type used when neither the goal nor the build names one.
pub const DEFAULT_BUILD_TYPE: &str = "minSizeRel";

/// A concrete build: target, type, variables and architecture.
///
/// When `script` is present the build runs those shell steps in order
/// instead of invoking the native build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSpec {
    goal: String,
    #[serde(rename = "type")]
    build_type: String,
    vars: BTreeMap<String, String>,
    description: String,
    arch: String,
    script: Option<Vec<String>>,
    artifacts: Vec<String>,
}

impl BuildSpec {
    /// Create a spec for a bare build target with default settings.
    pub fn new(goal: impl Into<String>) -> Self {
        BuildSpec {
            goal: goal.into(),
            build_type: DEFAULT_BUILD_TYPE.to_string(),
            vars: BTreeMap::new(),
            description: String::new(),
            arch: String::new(),
            script: None,
            artifacts: Vec::new(),
        }
    }

    pub fn with_build_type(mut self, build_type: impl Into<String>) -> Self {
        self.build_type = build_type.into();
        self
    }

    pub fn with_vars(mut self, vars: BTreeMap<String, String>) -> Self {
        self.vars = vars;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    pub fn with_script(mut self, script: Option<Vec<String>>) -> Self {
        self.script = script;
        self
    }

    pub fn with_artifacts(mut self, artifacts: Vec<String>) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// The native build target.
    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn build_type(&self) -> &str {
        &self.build_type
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Script steps, if this build is script-driven.
    pub fn script(&self) -> Option<&[String]> {
        self.script.as_deref()
    }

    pub fn artifacts(&self) -> &[String] {
        &self.artifacts
    }
}
