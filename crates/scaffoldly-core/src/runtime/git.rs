//! Repository initialization for freshly scaffolded projects

use super::command::CommandRunner;
use crate::error::{Result, ScaffoldError};
use std::path::Path;
use tracing::{debug, info};

/// Branch created by `git init`
pub const INITIAL_BRANCH: &str = "development";

/// Message of the first commit
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Creates the repository and commits the scaffolded files
pub struct RepositoryInitializer<'a> {
    runner: &'a CommandRunner,
}

impl<'a> RepositoryInitializer<'a> {
    pub fn new(runner: &'a CommandRunner) -> Self {
        Self { runner }
    }

    /// `git init`, stage everything, commit
    ///
    /// Files already written stay on disk if any step fails.
    pub async fn initialize(&self, root: &Path) -> Result<()> {
        info!(root = %root.display(), "initializing git repository");

        self.git(root, "init", &["init", "--initial-branch", INITIAL_BRANCH])
            .await?;
        self.git(root, "add", &["add", "."]).await?;
        self.git(root, "commit", &["commit", "-m", INITIAL_COMMIT_MESSAGE])
            .await?;

        info!("initial commit created");
        Ok(())
    }

    async fn git(&self, root: &Path, step: &str, args: &[&str]) -> Result<()> {
        debug!(step, "running git");
        let output = self.runner.run(root, "git", args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(ScaffoldError::vcs(step, message));
        }

        Ok(())
    }
}
