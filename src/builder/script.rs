//! Shell execution of build script steps.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::builder::ScriptRunner;
use crate::util::process::ProcessBuilder;

/// Runs each step through the platform shell.
#[derive(Debug, Clone)]
pub struct ShellScriptRunner {
    shell: String,
    flag: String,
}

impl ShellScriptRunner {
    /// Use a specific shell, e.g. `("bash", "-c")`.
    pub fn with_shell(shell: impl Into<String>, flag: impl Into<String>) -> Self {
        ShellScriptRunner {
            shell: shell.into(),
            flag: flag.into(),
        }
    }
}

impl Default for ShellScriptRunner {
    fn default() -> Self {
        if cfg!(windows) {
            Self::with_shell("cmd", "/C")
        } else {
            Self::with_shell("sh", "-c")
        }
    }
}

impl ScriptRunner for ShellScriptRunner {
    fn run(&self, command: &str, cwd: &Path, env: &BTreeMap<String, String>) -> Result<i32> {
        ProcessBuilder::new(&self.shell)
            .arg(&self.flag)
            .arg(command)
            .cwd(cwd)
            .envs(env)
            .run_for_code(true)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exit_code_reported() {
        let tmp = TempDir::new().unwrap();
        let runner = ShellScriptRunner::default();
        assert_eq!(runner.run("true", tmp.path(), &BTreeMap::new()).unwrap(), 0);
        assert_eq!(runner.run("exit 3", tmp.path(), &BTreeMap::new()).unwrap(), 3);
    }

    #[test]
    fn test_env_and_cwd() {
        let tmp = TempDir::new().unwrap();
        let mut env = BTreeMap::new();
        env.insert("ZAZU_TEST_VALUE".to_string(), "hello".to_string());

        let runner = ShellScriptRunner::default();
        let code = runner
            .run("echo \"$ZAZU_TEST_VALUE\" > out.txt", tmp.path(), &env)
            .unwrap();

        assert_eq!(code, 0);
        let out = std::fs::read_to_string(tmp.path().join("out.txt")).unwrap();
        assert_eq!(out.trim(), "hello");
    }
}
