//! Question slots asked by the selection engine, in order
//!
//! Each slot decides whether it applies given the answers so far and the
//! command-line arguments, builds its question (choices depend on earlier
//! answers), and validates the answer into the draft selection.

use super::prompt::{SelectItem, SelectPrompt, TextPrompt};
use super::{OverwriteMode, SelectionArgs};
use crate::catalog::{Catalog, Framework, TemplateMatch};
use crate::error::{Result, ScaffoldError};
use crate::naming::{self, DEFAULT_TARGET_DIR};
use crate::workspace;
use std::path::{Path, PathBuf};

/// Every slot in asking order
pub const SLOTS: [Slot; 5] = [
    Slot::ProjectDir,
    Slot::Overwrite,
    Slot::PackageName,
    Slot::Framework,
    Slot::Variant,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    ProjectDir,
    Overwrite,
    PackageName,
    Framework,
    Variant,
}

/// Question rendered for a slot
#[derive(Debug, Clone)]
pub enum Question {
    Text(TextPrompt),
    Select(SelectPrompt),
}

/// Raw answer to a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Choice(usize),
}

/// What the engine does after a slot accepted its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Cancel,
}

/// Answers collected so far
#[derive(Debug, Clone)]
pub struct Draft {
    pub target_dir: String,
    pub overwrite: Option<OverwriteMode>,
    pub package_name: Option<String>,
    pub framework: Option<&'static Framework>,
    pub variant: Option<&'static str>,
}

/// Inputs that stay fixed while the slots run
pub struct Context<'a> {
    pub cwd: &'a Path,
    pub catalog: Catalog,
    pub args: &'a SelectionArgs,
    /// `--template` resolved against the catalog, if it names a known template
    pub template: Option<TemplateMatch>,
}

impl Draft {
    /// Initial draft: values supplied on the command line are already filled in
    pub fn new(ctx: &Context<'_>) -> Self {
        let target_dir = ctx
            .args
            .target_dir
            .as_deref()
            .map(naming::format_target_dir)
            .filter(|dir| !dir.is_empty())
            .unwrap_or_else(|| DEFAULT_TARGET_DIR.to_string());

        Self {
            target_dir,
            overwrite: None,
            package_name: None,
            framework: ctx.template.map(|t| t.framework),
            variant: ctx.template.and_then(|t| t.variant).map(|v| v.branch),
        }
    }

    pub fn project_name(&self, cwd: &Path) -> String {
        naming::project_name(&self.target_dir, cwd)
    }

    pub fn root(&self, cwd: &Path) -> PathBuf {
        crate::scaffold::resolve_root(cwd, &self.target_dir)
    }
}

fn validate_package_name(name: &str) -> std::result::Result<(), &'static str> {
    if naming::is_valid_package_name(name) {
        Ok(())
    } else {
        Err("Invalid package.json name")
    }
}

impl Slot {
    /// Whether this slot takes part in the current run
    pub fn applies(self, draft: &Draft, ctx: &Context<'_>) -> Result<bool> {
        Ok(match self {
            Slot::ProjectDir => !ctx.args.has_target_dir(),
            Slot::Overwrite => {
                let root = draft.root(ctx.cwd);
                workspace::exists(&root)
                    && !workspace::is_empty(&root).map_err(|e| ScaffoldError::fs(&root, e))?
            }
            Slot::PackageName => !naming::is_valid_package_name(&draft.project_name(ctx.cwd)),
            Slot::Framework => ctx.template.is_none(),
            Slot::Variant => {
                draft.variant.is_none() && draft.framework.is_some_and(|f| f.has_variants())
            }
        })
    }

    /// Answer supplied up front, which suppresses the prompt
    pub fn preset(self, ctx: &Context<'_>) -> Option<Answer> {
        match self {
            Slot::Overwrite => ctx.args.overwrite.map(|mode| Answer::Choice(mode.index())),
            _ => None,
        }
    }

    pub fn question(self, draft: &Draft, ctx: &Context<'_>) -> Question {
        match self {
            Slot::ProjectDir => Question::Text(TextPrompt {
                message: "Project name:".to_string(),
                initial: DEFAULT_TARGET_DIR.to_string(),
                validate: None,
            }),
            Slot::Overwrite => {
                let subject = if draft.target_dir == "." {
                    "Current directory".to_string()
                } else {
                    format!("Target directory \"{}\"", draft.target_dir)
                };
                Question::Select(SelectPrompt {
                    message: format!("{} is not empty. Please choose how to proceed:", subject),
                    items: OverwriteMode::ALL
                        .iter()
                        .map(|mode| SelectItem {
                            label: mode.label().to_string(),
                            color: None,
                        })
                        .collect(),
                    initial: 0,
                })
            }
            Slot::PackageName => Question::Text(TextPrompt {
                message: "Package name:".to_string(),
                initial: naming::to_valid_package_name(&draft.project_name(ctx.cwd)),
                validate: Some(validate_package_name),
            }),
            Slot::Framework => {
                let message = match ctx.args.template.as_deref() {
                    Some(arg) => format!(
                        "\"{}\" isn't a valid template. Please choose from below: ",
                        arg
                    ),
                    None => "Select a framework:".to_string(),
                };
                Question::Select(SelectPrompt {
                    message,
                    items: ctx
                        .catalog
                        .frameworks()
                        .iter()
                        .map(|f| SelectItem {
                            label: f.label().to_string(),
                            color: Some(f.color),
                        })
                        .collect(),
                    initial: 0,
                })
            }
            Slot::Variant => {
                let variants = draft.framework.map(|f| f.variants).unwrap_or_default();
                Question::Select(SelectPrompt {
                    message: "Select a variant:".to_string(),
                    items: variants
                        .iter()
                        .map(|v| SelectItem {
                            label: v.label().to_string(),
                            color: Some(v.color),
                        })
                        .collect(),
                    initial: 0,
                })
            }
        }
    }

    /// Validate an answer and record it; `Err` carries a message and asks again
    pub fn accept(
        self,
        draft: &mut Draft,
        ctx: &Context<'_>,
        answer: Answer,
    ) -> std::result::Result<Step, String> {
        match (self, answer) {
            (Slot::ProjectDir, Answer::Text(text)) => {
                let dir = naming::format_target_dir(&text);
                draft.target_dir = if dir.is_empty() {
                    DEFAULT_TARGET_DIR.to_string()
                } else {
                    dir
                };
                Ok(Step::Continue)
            }
            (Slot::Overwrite, Answer::Choice(idx)) => {
                let mode = OverwriteMode::from_index(idx)
                    .ok_or_else(|| format!("Invalid overwrite choice: {}", idx))?;
                draft.overwrite = Some(mode);
                if mode == OverwriteMode::No {
                    Ok(Step::Cancel)
                } else {
                    Ok(Step::Continue)
                }
            }
            (Slot::PackageName, Answer::Text(text)) => {
                validate_package_name(&text)?;
                draft.package_name = Some(text);
                Ok(Step::Continue)
            }
            (Slot::Framework, Answer::Choice(idx)) => {
                let framework = ctx
                    .catalog
                    .frameworks()
                    .get(idx)
                    .ok_or_else(|| format!("Invalid framework choice: {}", idx))?;
                draft.framework = Some(framework);
                draft.variant = None;
                Ok(Step::Continue)
            }
            (Slot::Variant, Answer::Choice(idx)) => {
                let variant = draft
                    .framework
                    .and_then(|f| f.variants.get(idx))
                    .ok_or_else(|| format!("Invalid variant choice: {}", idx))?;
                draft.variant = Some(variant.branch);
                Ok(Step::Continue)
            }
            (slot, answer) => Err(format!("Unexpected answer {:?} for {:?}", answer, slot)),
        }
    }
}
