//! Template fetching from codeload-style zip archives or a local directory
//!
//! Remote templates are branch archives served at
//! `{download_url}/{repo}/zip/refs/heads/{branch}`. Each one unpacks to a
//! single `{repo}-{branch}` directory inside a fresh scratch directory, which
//! is left behind after scaffolding.

use crate::catalog::Framework;
use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;
use zip::ZipArchive;

/// Template source - either remote archives or a local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Download from each framework's base URL, unless overridden
    Remote { base_override: Option<Url> },
    /// Already-extracted templates (for development use)
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a remote template source from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let base_override = match std::env::var(config.download_url_env()) {
            Ok(value) if !value.trim().is_empty() => Some(Url::parse(value.trim()).map_err(
                |e| ScaffoldError::Validation(format!("Invalid download URL {}: {}", value, e)),
            )?),
            _ => None,
        };
        Ok(Self::Remote { base_override })
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Name of the directory a branch archive extracts to
pub fn extracted_dir_name(repo: &str, branch: &str) -> String {
    format!("{}-{}", repo, branch)
}

/// Template fetcher - resolves a framework/branch pair to a template root on disk
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let source = TemplateSource::from_config(config)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateSource::local(path), user_agent)
    }

    /// Build `{base}/{repo}/zip/refs/heads/{branch}`, preserving query parameters
    pub fn download_url(base: &Url, repo: &str, branch: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ScaffoldError::Validation(format!("URL cannot have path segments: {}", base))
            })?
            .pop_if_empty()
            .extend([repo, "zip", "refs", "heads", branch]);
        Ok(url)
    }

    /// Resolve a framework/branch pair to an extracted template root
    pub async fn fetch(&self, framework: &Framework, branch: &str) -> Result<PathBuf> {
        match &self.source {
            TemplateSource::Local(dir) => Self::resolve_local(dir, framework.repo, branch),
            TemplateSource::Remote { base_override } => {
                let base = match base_override {
                    Some(url) => url.clone(),
                    None => Url::parse(framework.download_url).map_err(|e| {
                        ScaffoldError::fetch(framework.download_url, format!("invalid URL: {}", e))
                    })?,
                };
                let url = Self::download_url(&base, framework.repo, branch)?;
                let bytes = self.download(&url).await?;

                let scratch = tempfile::Builder::new()
                    .prefix("template-")
                    .tempdir()
                    .map_err(|e| ScaffoldError::fetch(&url, e))?
                    .keep();
                debug!(scratch = %scratch.display(), "created scratch directory");

                let archive_name = url
                    .path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .filter(|name| !name.is_empty())
                    .unwrap_or("template.zip")
                    .to_string();

                unpack(&scratch, &archive_name, &bytes, framework.repo, branch)
                    .map_err(|message| ScaffoldError::fetch(&url, message))
            }
        }
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>> {
        info!(%url, "downloading template archive");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ScaffoldError::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(ScaffoldError::fetch(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScaffoldError::fetch(url, e))?;
        debug!(%url, bytes = bytes.len(), "downloaded template archive");
        Ok(bytes.to_vec())
    }

    /// A local template directory either holds `{repo}-{branch}` or is the template itself
    fn resolve_local(dir: &Path, repo: &str, branch: &str) -> Result<PathBuf> {
        let nested = dir.join(extracted_dir_name(repo, branch));
        if nested.is_dir() {
            Ok(nested)
        } else if dir.is_dir() {
            Ok(dir.to_path_buf())
        } else {
            Err(ScaffoldError::fetch(
                dir.display(),
                "template directory not found",
            ))
        }
    }
}

/// Write an archive into `scratch`, extract it there, delete the archive and
/// return the extracted `{repo}-{branch}` directory
fn unpack(
    scratch: &Path,
    archive_name: &str,
    bytes: &[u8],
    repo: &str,
    branch: &str,
) -> std::result::Result<PathBuf, String> {
    let archive_path = scratch.join(archive_name);
    std::fs::write(&archive_path, bytes)
        .map_err(|e| format!("failed to write {}: {}", archive_path.display(), e))?;

    {
        let file = File::open(&archive_path)
            .map_err(|e| format!("failed to open {}: {}", archive_path.display(), e))?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| format!("failed to read zip archive: {}", e))?;
        archive
            .extract(scratch)
            .map_err(|e| format!("failed to extract zip archive: {}", e))?;
    }

    std::fs::remove_file(&archive_path)
        .map_err(|e| format!("failed to remove {}: {}", archive_path.display(), e))?;

    let root = scratch.join(extracted_dir_name(repo, branch));
    if !root.is_dir() {
        return Err(format!(
            "archive did not contain {}",
            extracted_dir_name(repo, branch)
        ));
    }
    Ok(root)
}
