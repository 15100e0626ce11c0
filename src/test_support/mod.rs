//! Test doubles for the collaborators a build talks to.
//!
//! Each double records what it was asked to do so tests can assert on the
//! exact sequence of configure/build calls, script steps and publishes
//! without spawning processes.

pub mod fixtures;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::builder::{NativeBuildTool, ScriptRunner};
use crate::ci::BuildServer;
use crate::vcs::{VcsError, VcsProvider};

/// Version-control provider with canned answers.
#[derive(Debug, Clone)]
pub struct MockVcs {
    branch: String,
    short_sha: String,
    dirty: bool,
    tags: Vec<String>,
    failure: Option<String>,
}

impl MockVcs {
    /// A clean checkout of `branch` at commit `abc1234` with no tags.
    pub fn on_branch(branch: impl Into<String>) -> Self {
        MockVcs {
            branch: branch.into(),
            short_sha: "abc1234".to_string(),
            dirty: false,
            tags: Vec::new(),
            failure: None,
        }
    }

    /// A provider whose every query fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        MockVcs {
            failure: Some(message.into()),
            ..MockVcs::on_branch("HEAD")
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    fn check(&self) -> Result<(), VcsError> {
        match &self.failure {
            Some(message) => Err(git2::Error::from_str(message).into()),
            None => Ok(()),
        }
    }
}

impl VcsProvider for MockVcs {
    fn head_short_sha(&self) -> Result<String, VcsError> {
        self.check()?;
        Ok(self.short_sha.clone())
    }

    fn is_dirty(&self) -> Result<bool, VcsError> {
        self.check()?;
        Ok(self.dirty)
    }

    fn current_branch(&self) -> Result<String, VcsError> {
        self.check()?;
        Ok(self.branch.clone())
    }

    fn tags_at_head(&self) -> Result<Vec<String>, VcsError> {
        self.check()?;
        Ok(self.tags.clone())
    }
}

/// Native build tool that records its calls instead of running anything.
#[derive(Debug)]
pub struct RecordingBuildTool {
    known: Vec<String>,
    configure_code: i32,
    build_code: i32,
    calls: Mutex<Vec<String>>,
    vars: Mutex<Vec<BTreeMap<String, String>>>,
}

impl RecordingBuildTool {
    pub fn new() -> Self {
        RecordingBuildTool {
            known: vec![
                "arm32-linux-gnueabihf".to_string(),
                "host".to_string(),
                "x86_64-linux-gcc".to_string(),
            ],
            configure_code: 0,
            build_code: 0,
            calls: Mutex::new(Vec::new()),
            vars: Mutex::new(Vec::new()),
        }
    }

    pub fn with_configure_code(mut self, code: i32) -> Self {
        self.configure_code = code;
        self
    }

    pub fn with_build_code(mut self, code: i32) -> Self {
        self.build_code = code;
        self
    }

    /// Calls so far, as `configure <arch> <type>` or `build <arch> <type> <target>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Variables passed to each configure call.
    pub fn configure_vars(&self) -> Vec<BTreeMap<String, String>> {
        self.vars.lock().unwrap().clone()
    }
}

impl Default for RecordingBuildTool {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeBuildTool for RecordingBuildTool {
    fn known_arches(&self) -> Vec<String> {
        self.known.clone()
    }

    fn configure(
        &self,
        _root_dir: &Path,
        _build_dir: &Path,
        arch: &str,
        build_type: &str,
        vars: &BTreeMap<String, String>,
        _verbose: bool,
    ) -> Result<i32> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("configure {} {}", arch, build_type));
        self.vars.lock().unwrap().push(vars.clone());
        Ok(self.configure_code)
    }

    fn build(
        &self,
        _build_dir: &Path,
        arch: &str,
        build_type: &str,
        target: &str,
        _verbose: bool,
    ) -> Result<i32> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("build {} {} {}", arch, build_type, target));
        Ok(self.build_code)
    }
}

/// Script runner that records each step and the environment it saw.
#[derive(Debug, Default)]
pub struct RecordingScriptRunner {
    failures: BTreeMap<String, i32>,
    steps: Mutex<Vec<(String, BTreeMap<String, String>)>>,
}

impl RecordingScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `step` exit with `code`.
    pub fn fail_on(mut self, step: &str, code: i32) -> Self {
        self.failures.insert(step.to_string(), code);
        self
    }

    pub fn steps(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.steps.lock().unwrap().clone()
    }
}

impl ScriptRunner for RecordingScriptRunner {
    fn run(&self, command: &str, _cwd: &Path, env: &BTreeMap<String, String>) -> Result<i32> {
        self.steps
            .lock()
            .unwrap()
            .push((command.to_string(), env.clone()));
        Ok(self.failures.get(command).copied().unwrap_or(0))
    }
}

/// Build server that records publish requests, optionally failing them.
#[derive(Debug, Default)]
pub struct RecordingBuildServer {
    fail: bool,
    published: Mutex<Vec<Vec<String>>>,
}

impl RecordingBuildServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        RecordingBuildServer {
            fail: true,
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<Vec<String>> {
        self.published.lock().unwrap().clone()
    }
}

impl BuildServer for RecordingBuildServer {
    fn name(&self) -> &str {
        "recording"
    }

    fn publish_artifacts(&self, paths: &[String]) -> Result<()> {
        self.published.lock().unwrap().push(paths.to_vec());
        if self.fail {
            bail!("connection refused");
        }
        Ok(())
    }
}
