//! Project and package name normalization

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Directory used when the user leaves the project name empty
pub const DEFAULT_TARGET_DIR: &str = "my-app";

static PACKAGE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
        .expect("package name regex is valid")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static INVALID_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\-~]+").expect("invalid chars regex is valid"));

/// Trim whitespace and strip trailing slashes from a directory argument
pub fn format_target_dir(raw: &str) -> String {
    raw.trim_start()
        .trim_end_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

/// Check a name against the package.json name grammar
pub fn is_valid_package_name(name: &str) -> bool {
    PACKAGE_NAME_RE.is_match(name)
}

/// Coerce an arbitrary project name into a valid package name
pub fn to_valid_package_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let dashed = WHITESPACE_RE.replace_all(&lowered, "-");
    let stripped = dashed
        .strip_prefix(|c: char| c == '.' || c == '_')
        .unwrap_or(dashed.as_ref());
    INVALID_CHARS_RE.replace_all(stripped, "-").into_owned()
}

/// Project name for a target directory; "." means the current directory
pub fn project_name(target_dir: &str, cwd: &Path) -> String {
    if target_dir == "." {
        cwd.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_TARGET_DIR.to_string())
    } else {
        target_dir.to_string()
    }
}
