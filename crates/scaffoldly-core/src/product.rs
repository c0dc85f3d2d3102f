//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a product binary implements to configure
//! the scaffolding behavior: which catalog it offers, where overrides come
//! from, and what it tells the user once the project exists.

use crate::catalog::Catalog;
use crate::scaffold::ScaffoldReport;

/// Configuration trait for scaffolding products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Frameworks offered by this product
    fn catalog(&self) -> Catalog;

    /// Environment variable overriding every framework's download base URL
    fn download_url_env(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Steps to get the new project running
    fn next_steps(&self, report: &ScaffoldReport) -> Vec<String>;

    /// Line shown after the next steps, explaining what the start command does
    fn start_note(&self) -> Option<&'static str> {
        None
    }

    /// Steps to publish the repository to a remote
    fn publish_steps(&self, report: &ScaffoldReport) -> Vec<String>;

    /// Command to run once the project is ready to deploy
    fn deploy_command(&self) -> Option<&'static str> {
        None
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
