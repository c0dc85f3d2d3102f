//! Charm-style CLI prompts using cliclack

use crate::product::ProductConfig;
use crate::scaffold::{ScaffoldOptions, ScaffoldOutcome, ScaffoldReport, Scaffolder};
use crate::selection::prompt::{Prompter, SelectPrompt, TextPrompt};
use crate::selection::{OverwriteMode, SelectionArgs};
use anyhow::{Context, Result};
use cliclack::ProgressBar;
use colored::Colorize;
use std::io;
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create
    pub directory: Option<String>,

    /// Template name to use
    pub template: Option<String>,

    /// How to treat an existing non-empty directory
    pub overwrite: Option<OverwriteMode>,

    /// Local directory to use for templates instead of downloading them
    pub template_dir: Option<PathBuf>,
}

/// [`Prompter`] rendering questions with cliclack
///
/// Progress lines are shown as a spinner that is settled when the next step
/// starts or the run ends.
#[derive(Default)]
pub struct CliclackPrompter {
    spinner: Option<(ProgressBar, String)>,
}

impl CliclackPrompter {
    /// Settle the running spinner, marking its step as done
    pub fn finish(&mut self) {
        if let Some((spinner, message)) = self.spinner.take() {
            spinner.stop(message);
        }
    }

    /// Settle the running spinner, marking its step as failed
    pub fn fail(&mut self) {
        if let Some((spinner, message)) = self.spinner.take() {
            spinner.error(message);
        }
    }
}

impl Prompter for CliclackPrompter {
    fn input(&mut self, prompt: &TextPrompt) -> io::Result<String> {
        let mut input = cliclack::input(&prompt.message)
            .placeholder(&prompt.initial)
            .default_input(&prompt.initial);
        if let Some(validate) = prompt.validate {
            input = input.validate(move |value: &String| validate(value));
        }
        input.interact()
    }

    fn select(&mut self, prompt: &SelectPrompt) -> io::Result<usize> {
        let mut select = cliclack::select(&prompt.message);
        for (idx, item) in prompt.items.iter().enumerate() {
            let label = match item.color {
                Some(color) => item.label.color(color).to_string(),
                None => item.label.clone(),
            };
            select = select.item(idx, label, "");
        }
        select.initial_value(prompt.initial).interact()
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::info(message)
    }

    fn progress(&mut self, message: &str) -> io::Result<()> {
        self.finish();
        let spinner = cliclack::spinner();
        spinner.start(message);
        self.spinner = Some((spinner, message.to_string()));
        Ok(())
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let options = ScaffoldOptions {
        cwd: std::env::current_dir().context("Failed to read the current directory")?,
        selection: SelectionArgs {
            target_dir: args.directory,
            template: args.template,
            overwrite: args.overwrite,
        },
        template_dir: args.template_dir,
    };
    if let Some(dir) = &options.template_dir {
        cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
    }

    let mut prompter = CliclackPrompter::default();
    let outcome = match Scaffolder::new(config).run(&mut prompter, &options).await {
        Ok(outcome) => {
            prompter.finish();
            outcome
        }
        Err(err) => {
            prompter.fail();
            return Err(err);
        }
    };

    match outcome {
        ScaffoldOutcome::Cancelled => {
            cliclack::outro_cancel(format!("{} Operation cancelled", "✖".red()))?;
        }
        ScaffoldOutcome::Created(report) => {
            cliclack::log::success("Done.")?;
            cliclack::log::info(created_summary(&report))?;
            print_next_steps(config, &report)?;
        }
    }

    Ok(())
}

fn created_summary(report: &ScaffoldReport) -> String {
    format!(
        "Created {} with {}",
        report.project_name.bold(),
        report.files.join(", ")
    )
}

/// Numbered lines for a block of steps
fn numbered(steps: &[String]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("  {}.  {}", i + 1, step))
        .collect()
}

fn print_next_steps<C: ProductConfig>(config: &C, report: &ScaffoldReport) -> Result<()> {
    println!();
    println!("  Next steps");
    println!();
    for line in numbered(&config.next_steps(report)) {
        println!("{}", line);
    }
    if let Some(note) = config.start_note() {
        println!();
        println!("  {}", note);
    }

    let publish = config.publish_steps(report);
    if !publish.is_empty() {
        println!();
        println!(
            "  To continue in GitHub Codespaces, push the {} branch",
            report.branch.cyan()
        );
        println!();
        for line in numbered(&publish) {
            println!("{}", line);
        }
    }

    if let Some(deploy) = config.deploy_command() {
        println!();
        println!("  When you're ready to deploy, run {}", deploy.bold());
    }
    println!();

    cliclack::outro(format!("Thanks for using {}!", config.display_name()))?;

    Ok(())
}
