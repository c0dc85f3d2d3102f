//! Scaffoldly Core - Shared library for the project scaffolding CLI
//!
//! This library provides the scaffolding pipeline: it asks which project to
//! create, downloads the matching template branch archive, materializes it
//! into the target directory, and commits the result to a new git repository.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name validation, directory inspection, template
//!   fetching and copying, git initialization
//! - **Layer 2: Workflow Orchestration** - `SelectionEngine` (ordered question slots
//!   behind a `Prompter` trait), `Scaffolder` pipeline and the `ProductConfig` trait
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffoldly_core::{Scaffolder, ScaffoldOptions, ScaffoldOutcome};
//!
//! let options = ScaffoldOptions { cwd, selection: args, template_dir: None };
//! match Scaffolder::new(&MyConfig).run(&mut my_prompter, &options).await? {
//!     ScaffoldOutcome::Created(report) => println!("cd {}", report.root.display()),
//!     ScaffoldOutcome::Cancelled => println!("cancelled"),
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod naming;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod selection;
pub mod templates;
pub mod workspace;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use catalog::{Catalog, Framework, Variant, CATALOG};
pub use error::ScaffoldError;
pub use product::ProductConfig;
pub use runtime::{CommandRunner, RepositoryInitializer};
pub use scaffold::{ScaffoldOptions, ScaffoldOutcome, ScaffoldReport, Scaffolder};
pub use selection::{
    prompt::Prompter, OverwriteMode, Selection, SelectionArgs, SelectionEngine, SelectionOutcome,
};
pub use templates::{TemplateFetcher, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
