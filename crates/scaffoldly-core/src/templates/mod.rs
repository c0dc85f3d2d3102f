//! Template fetching and materialization
//!
//! This module provides:
//! - Template fetching from branch archives or local directories
//! - Copying a template into the project root with renames and a denylist
//! - Patching package.json and devcontainer.json (comment-tolerant JSON)

pub mod copier;
pub mod fetcher;
pub mod jsonc;

pub use copier::{copy_tree, materialize, prepare_root, write_file};
pub use fetcher::{TemplateFetcher, TemplateSource};
