//! create-scaffoldly - Project scaffolding for Scaffoldly stacks

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser};
use scaffoldly_core::selection::OverwriteMode;
use scaffoldly_core::tui::CreateArgs;
use scaffoldly_core::{Catalog, ProductConfig, ScaffoldReport, CATALOG};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Scaffoldly product configuration
#[derive(Clone)]
pub struct ScaffoldlyConfig;

impl ProductConfig for ScaffoldlyConfig {
    fn name(&self) -> &'static str {
        "create-scaffoldly"
    }

    fn display_name(&self) -> &'static str {
        "Scaffoldly"
    }

    fn catalog(&self) -> Catalog {
        CATALOG
    }

    fn download_url_env(&self) -> &'static str {
        "SCAFFOLDLY_DOWNLOAD_URL"
    }

    fn cli_description(&self) -> &'static str {
        "Create a new Scaffoldly project"
    }

    fn next_steps(&self, report: &ScaffoldReport) -> Vec<String> {
        let mut steps = Vec::new();

        if let Some(dir) = &report.cd_path {
            steps.push(format!("cd {}", dir));
        }
        steps.push(report.start_command.to_string());

        steps
    }

    fn start_note(&self) -> Option<&'static str> {
        Some("Which will launch a devcontainer on your local machine.")
    }

    fn publish_steps(&self, report: &ScaffoldReport) -> Vec<String> {
        vec![
            "Create a new repository on GitHub".to_string(),
            "git remote add origin <repository-url>".to_string(),
            format!("git push -u origin {}", report.branch),
            "Open the repository in GitHub Codespaces".to_string(),
        ]
    }

    fn deploy_command(&self) -> Option<&'static str> {
        Some("npx slydo deploy")
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-scaffoldly")]
#[command(version)]
pub struct Args {
    /// Project directory to create
    pub directory: Option<String>,

    /// Template to use (e.g. react-vite or stack-aws-serverless-express)
    #[arg(short, long)]
    pub template: Option<String>,

    /// What to do when the target directory is not empty
    #[arg(long, value_enum)]
    pub overwrite: Option<OverwriteMode>,

    /// Local directory to use for templates instead of downloading them (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Increase diagnostic output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            directory: args.directory,
            template: args.template,
            overwrite: args.overwrite,
            template_dir: args.template_dir,
        }
    }
}

/// Parse arguments with the product's description as the help text
fn parse_args<I, T>(config: &ScaffoldlyConfig, argv: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = Args::command()
        .about(config.cli_description())
        .get_matches_from(argv);
    Ok(Args::from_arg_matches(&matches)?)
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C outside of a prompt
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = ScaffoldlyConfig;
    let args = parse_args(&config, std::env::args_os())?;
    init_tracing(args.verbose);

    let result = scaffoldly_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
