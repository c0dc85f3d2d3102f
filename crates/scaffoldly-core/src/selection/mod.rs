//! Interactive selection of the project to scaffold
//!
//! The engine walks an ordered list of [`Slot`]s. A slot is skipped when its
//! value is already known (from a command-line argument, or implied by an
//! earlier answer), asked otherwise, and re-asked while its answer fails
//! validation. Cancellation is only observed between slots.

pub mod prompt;
pub mod slots;

use crate::catalog::{Catalog, Framework, DEFAULT_BRANCH};
use crate::error::{Result, ScaffoldError};
use prompt::{is_cancelled, Prompter};
use slots::{Answer, Context, Draft, Question, Step, SLOTS};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use prompt::{SelectItem, SelectPrompt, TextPrompt, Validator};
pub use slots::Slot;

/// How to treat a non-empty target directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OverwriteMode {
    /// Remove existing files (except `.git`) and continue
    Yes,
    /// Cancel the operation
    No,
    /// Keep existing files and continue
    Ignore,
}

impl OverwriteMode {
    /// Choices in the order they are offered
    pub const ALL: [OverwriteMode; 3] = [OverwriteMode::Yes, OverwriteMode::No, OverwriteMode::Ignore];

    pub fn label(self) -> &'static str {
        match self {
            OverwriteMode::Yes => "Remove existing files and continue",
            OverwriteMode::No => "Cancel operation",
            OverwriteMode::Ignore => "Ignore files and continue",
        }
    }

    pub fn index(self) -> usize {
        match self {
            OverwriteMode::Yes => 0,
            OverwriteMode::No => 1,
            OverwriteMode::Ignore => 2,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Positional target directory
    pub target_dir: Option<String>,
    /// `--template`: a variant branch, or the repo of a framework without variants
    pub template: Option<String>,
    /// `--overwrite`: pre-answers the overwrite question
    pub overwrite: Option<OverwriteMode>,
}

impl SelectionArgs {
    /// A directory argument that is blank after formatting counts as absent
    pub fn has_target_dir(&self) -> bool {
        self.target_dir
            .as_deref()
            .is_some_and(|dir| !crate::naming::format_target_dir(dir).is_empty())
    }
}

/// Fully resolved user choices
#[derive(Debug, Clone)]
pub struct Selection {
    pub target_dir: String,
    pub project_name: String,
    /// Only collected when the project name is not a valid package name
    pub package_name: Option<String>,
    pub framework: &'static Framework,
    pub variant_branch: String,
    pub overwrite: Option<OverwriteMode>,
}

impl Selection {
    /// Name written into package.json and devcontainer.json
    pub fn resolved_name(&self) -> &str {
        self.package_name.as_deref().unwrap_or(&self.project_name)
    }

    pub fn root(&self, cwd: &Path) -> PathBuf {
        crate::scaffold::resolve_root(cwd, &self.target_dir)
    }
}

#[derive(Debug, Clone)]
pub enum SelectionOutcome {
    Completed(Selection),
    Cancelled,
}

/// Runs the question slots against a catalog
pub struct SelectionEngine<'a> {
    catalog: Catalog,
    cwd: &'a Path,
    args: &'a SelectionArgs,
}

impl<'a> SelectionEngine<'a> {
    pub fn new(catalog: Catalog, cwd: &'a Path, args: &'a SelectionArgs) -> Self {
        Self { catalog, cwd, args }
    }

    pub fn run(&self, prompter: &mut dyn Prompter) -> Result<SelectionOutcome> {
        let ctx = Context {
            cwd: self.cwd,
            catalog: self.catalog,
            args: self.args,
            template: self
                .args
                .template
                .as_deref()
                .and_then(|name| self.catalog.find_template(name)),
        };
        if let (Some(name), None) = (self.args.template.as_deref(), ctx.template) {
            debug!(template = name, known = ?self.catalog.templates(), "unknown template");
        }
        let mut draft = Draft::new(&ctx);

        for slot in SLOTS {
            if !slot.applies(&draft, &ctx)? {
                debug!(?slot, "skipping slot");
                continue;
            }

            let step = match slot.preset(&ctx) {
                Some(answer) => slot
                    .accept(&mut draft, &ctx, answer)
                    .map_err(ScaffoldError::Validation)?,
                None => match ask(slot, &mut draft, &ctx, prompter) {
                    Ok(step) => step,
                    Err(err) if is_cancelled(&err) => return Ok(SelectionOutcome::Cancelled),
                    Err(err) => return Err(ScaffoldError::Prompt(err)),
                },
            };

            if step == Step::Cancel {
                return Ok(SelectionOutcome::Cancelled);
            }
        }

        self.finish(draft).map(SelectionOutcome::Completed)
    }

    fn finish(&self, draft: Draft) -> Result<Selection> {
        let framework = draft
            .framework
            .ok_or_else(|| ScaffoldError::Validation("No framework selected".to_string()))?;
        let branch = match draft.variant {
            Some(branch) => branch,
            None if framework.has_variants() => {
                return Err(ScaffoldError::Validation(format!(
                    "No variant selected for {}",
                    framework.repo
                )))
            }
            None => DEFAULT_BRANCH,
        };

        if !self.catalog.resolves(framework, branch) {
            return Err(ScaffoldError::Validation(format!(
                "{} is not a known variant of {}",
                branch, framework.repo
            )));
        }

        Ok(Selection {
            project_name: draft.project_name(self.cwd),
            target_dir: draft.target_dir,
            package_name: draft.package_name,
            framework,
            variant_branch: branch.to_string(),
            overwrite: draft.overwrite,
        })
    }
}

/// Ask one slot until its answer validates
fn ask(
    slot: Slot,
    draft: &mut Draft,
    ctx: &Context<'_>,
    prompter: &mut dyn Prompter,
) -> std::io::Result<Step> {
    loop {
        let answer = match slot.question(draft, ctx) {
            Question::Text(prompt) => Answer::Text(prompter.input(&prompt)?),
            Question::Select(prompt) => Answer::Choice(prompter.select(&prompt)?),
        };
        match slot.accept(draft, ctx, answer) {
            Ok(step) => return Ok(step),
            Err(message) => prompter.info(&message)?,
        }
    }
}
