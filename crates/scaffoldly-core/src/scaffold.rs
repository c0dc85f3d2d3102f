//! The scaffolding pipeline: select, fetch, materialize, commit
//!
//! Every step runs to completion before the next one starts. Only the
//! selection step can be cancelled; once the template is being fetched the
//! pipeline either finishes or fails, leaving written files in place.

use crate::product::ProductConfig;
use crate::runtime::{CommandRunner, RepositoryInitializer, INITIAL_BRANCH};
use crate::selection::prompt::Prompter;
use crate::selection::{Selection, SelectionArgs, SelectionEngine, SelectionOutcome};
use crate::templates::{copier, TemplateFetcher};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Inputs to a scaffolding run
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Directory relative target paths are resolved against
    pub cwd: PathBuf,
    /// Values supplied on the command line
    pub selection: SelectionArgs,
    /// Local directory to use for templates instead of downloading them
    pub template_dir: Option<PathBuf>,
}

/// What was created, for rendering the final instructions
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    /// Path to `cd` into, `None` when the project is the current directory
    pub cd_path: Option<String>,
    pub project_name: String,
    pub start_command: &'static str,
    pub branch: &'static str,
    /// Top-level entries written into the project
    pub files: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum ScaffoldOutcome {
    Created(ScaffoldReport),
    Cancelled,
}

/// Resolve the project root, dropping `.` components
pub fn resolve_root(cwd: &Path, target_dir: &str) -> PathBuf {
    cwd.join(target_dir).components().collect()
}

/// Relative path to show in the `cd` hint, quoted when it contains spaces
pub fn cd_path(cwd: &Path, root: &Path) -> Option<String> {
    if root == cwd {
        return None;
    }
    let relative = root
        .strip_prefix(cwd)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| root.display().to_string());
    Some(if relative.contains(' ') {
        format!("\"{}\"", relative)
    } else {
        relative
    })
}

/// Runs the pipeline for one product
pub struct Scaffolder<'a, C: ProductConfig> {
    config: &'a C,
    runner: CommandRunner,
}

impl<'a, C: ProductConfig> Scaffolder<'a, C> {
    pub fn new(config: &'a C) -> Self {
        Self {
            config,
            runner: CommandRunner::default(),
        }
    }

    /// Use a different command runner (e.g. with a custom lookup)
    pub fn with_runner(mut self, runner: CommandRunner) -> Self {
        self.runner = runner;
        self
    }

    pub async fn run(
        &self,
        prompter: &mut dyn Prompter,
        options: &ScaffoldOptions,
    ) -> Result<ScaffoldOutcome> {
        let engine = SelectionEngine::new(self.config.catalog(), &options.cwd, &options.selection);
        let selection = match engine.run(prompter)? {
            SelectionOutcome::Completed(selection) => selection,
            SelectionOutcome::Cancelled => {
                info!("selection cancelled");
                return Ok(ScaffoldOutcome::Cancelled);
            }
        };

        let report = self.create(prompter, options, &selection).await?;
        Ok(ScaffoldOutcome::Created(report))
    }

    async fn create(
        &self,
        prompter: &mut dyn Prompter,
        options: &ScaffoldOptions,
        selection: &Selection,
    ) -> Result<ScaffoldReport> {
        let root = selection.root(&options.cwd);

        copier::prepare_root(&root, selection.overwrite)
            .await
            .with_context(|| format!("Failed to prepare {}", root.display()))?;

        prompter.progress(&format!("Scaffolding project in {}...", root.display()))?;

        let fetcher = match &options.template_dir {
            Some(dir) => TemplateFetcher::from_local(dir.clone(), self.config.user_agent()),
            None => TemplateFetcher::from_config(self.config)?,
        };
        let template_root = fetcher
            .fetch(selection.framework, &selection.variant_branch)
            .await?;
        info!(template = %template_root.display(), "template ready");

        let files = copier::materialize(&template_root, &root, selection).await?;

        prompter.progress(&format!("Initializing git in {}...", root.display()))?;
        RepositoryInitializer::new(&self.runner)
            .initialize(&root)
            .await?;

        Ok(ScaffoldReport {
            cd_path: cd_path(&options.cwd, &root),
            root,
            project_name: selection.resolved_name().to_string(),
            start_command: selection.framework.start_command,
            branch: INITIAL_BRANCH,
            files,
        })
    }
}
