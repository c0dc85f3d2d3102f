//! External command execution and version control
//!
//! This module provides:
//! - Command lookup and execution with an injectable resolver
//! - Repository initialization for scaffolded projects

pub mod command;
pub mod git;

pub use command::{which_lookup, CommandLookup, CommandRunner};
pub use git::{RepositoryInitializer, INITIAL_BRANCH, INITIAL_COMMIT_MESSAGE};
