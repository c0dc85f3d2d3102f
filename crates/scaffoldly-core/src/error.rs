//! Error types for scaffoldly-core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using scaffoldly-core's error type
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Failures raised while scaffolding a project
///
/// Cancellation is not an error: the selection engine reports it as an
/// outcome so callers can exit cleanly.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Invalid package name or template argument
    #[error("{0}")]
    Validation(String),

    /// The prompt could not be rendered or read
    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// An external executable could not be located
    #[error("Unable to locate the `{command}` command on this system.")]
    CommandNotFound { command: String },

    /// A located executable could not be started
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Network or archive failure while retrieving a template
    #[error("Error downloading or extracting ZIP file from {url}: {message}")]
    Fetch { url: String, message: String },

    /// Copy, write or mkdir failure
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template document could not be parsed or patched
    #[error("Invalid document {}: {message}", path.display())]
    InvalidDocument { path: PathBuf, message: String },

    /// git init/add/commit was rejected
    #[error("git {step} failed: {message}")]
    Vcs { step: String, message: String },
}

impl ScaffoldError {
    pub fn fs(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn fetch(url: impl ToString, message: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn vcs(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Vcs {
            step: step.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_not_found_names_command() {
        let err = ScaffoldError::CommandNotFound {
            command: "git".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to locate the `git` command on this system."
        );
    }

    #[test]
    fn test_fetch_error_wraps_cause() {
        let err = ScaffoldError::fetch("https://example.com/x", "HTTP 404 Not Found");
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/x"));
        assert!(msg.contains("HTTP 404"));
    }
}
