//! Prompt capability consumed by the selection engine
//!
//! The engine only describes questions; rendering them is up to a
//! [`Prompter`]. The `tui` feature provides a cliclack implementation.

use colored::Color;
use std::io;

/// Validator run by the prompter before an answer is submitted
pub type Validator = fn(&str) -> Result<(), &'static str>;

/// Free-text question
#[derive(Debug, Clone)]
pub struct TextPrompt {
    pub message: String,
    pub initial: String,
    pub validate: Option<Validator>,
}

/// One entry of a select question
#[derive(Debug, Clone)]
pub struct SelectItem {
    pub label: String,
    pub color: Option<Color>,
}

/// Single-choice question; answers are indices into `items`
#[derive(Debug, Clone)]
pub struct SelectPrompt {
    pub message: String,
    pub items: Vec<SelectItem>,
    pub initial: usize,
}

/// Renders questions and returns the user's answers
///
/// Implementations report an aborted prompt (Esc, Ctrl-C) as an
/// [`io::ErrorKind::Interrupted`] error, which the engine treats as
/// cancellation.
pub trait Prompter {
    fn input(&mut self, prompt: &TextPrompt) -> io::Result<String>;

    fn select(&mut self, prompt: &SelectPrompt) -> io::Result<usize>;

    /// Diagnostic line shown to the user
    fn info(&mut self, message: &str) -> io::Result<()>;

    /// Announce a long-running pipeline step
    fn progress(&mut self, message: &str) -> io::Result<()> {
        self.info(message)
    }
}

pub fn is_cancelled(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::Interrupted
}
