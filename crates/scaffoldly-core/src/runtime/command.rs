//! Running external commands located through an injectable lookup
//!
//! Callers never spawn a program by bare name: the runner first resolves it
//! through its lookup function, so a missing tool surfaces as
//! [`ScaffoldError::CommandNotFound`] instead of an opaque spawn failure.

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Resolves a command name to an executable path
pub type CommandLookup = dyn Fn(&str) -> Result<PathBuf> + Send + Sync;

/// Look a command up on `PATH`
pub fn which_lookup(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| ScaffoldError::CommandNotFound {
        command: name.to_string(),
    })
}

/// Runs commands to completion, capturing their output
pub struct CommandRunner {
    lookup: Box<CommandLookup>,
    envs: Vec<(String, String)>,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(which_lookup)
    }
}

impl CommandRunner {
    pub fn new<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<PathBuf> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
            envs: Vec::new(),
        }
    }

    /// Set an environment variable for every command this runner starts
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        (self.lookup)(name)
    }

    /// Run `program args...` in `cwd` and wait for it to exit
    ///
    /// A non-zero exit status is not an error here; callers inspect
    /// `Output::status`.
    pub async fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<Output> {
        let executable = self.resolve(program)?;
        debug!(command = %executable.display(), ?args, cwd = %cwd.display(), "running command");

        TokioCommand::new(&executable)
            .args(args)
            .current_dir(cwd)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ScaffoldError::Spawn {
                command: program.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_which_lookup_missing_command() {
        let err = which_lookup("definitely-not-a-real-command-xyz").unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::CommandNotFound { ref command } if command == "definitely-not-a-real-command-xyz"
        ));
    }

    #[tokio::test]
    async fn test_run_uses_lookup() {
        let runner = CommandRunner::new(|name| {
            Err(ScaffoldError::CommandNotFound {
                command: name.to_string(),
            })
        });
        let dir = tempfile::tempdir().unwrap();
        let err = runner.run(dir.path(), "git", &["status"]).await.unwrap_err();
        assert!(err.to_string().contains("`git`"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_output_and_env() {
        let Ok(sh) = which_lookup("sh") else {
            return;
        };
        let runner = CommandRunner::new(move |_| Ok(sh.clone())).env("SCAFFOLDLY_TEST", "hello");
        let dir = tempfile::tempdir().unwrap();

        let output = runner
            .run(dir.path(), "sh", &["-c", "echo $SCAFFOLDLY_TEST; pwd"])
            .await
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with("hello\n"));
    }
}
