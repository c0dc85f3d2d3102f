//! Materializing an extracted template into the project directory

use super::jsonc::Document;
use crate::error::{Result, ScaffoldError};
use crate::selection::{OverwriteMode, Selection};
use crate::workspace::{self, VCS_DIR};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Template files that are never copied as-is
pub const SKIPPED_FILES: &[&str] = &[
    "README.md",
    "package.json",
    "yarn.lock",
    "package-lock.json",
    "TODO.md",
];

/// Files renamed while copying (npm strips `.gitignore` from published templates)
pub const RENAME_FILES: &[(&str, &str)] = &[("_gitignore", ".gitignore")];

pub const PACKAGE_JSON: &str = "package.json";
pub const DEVCONTAINER_JSON: &str = ".devcontainer/devcontainer.json";

fn renamed(name: &OsStr) -> &OsStr {
    RENAME_FILES
        .iter()
        .find(|(from, _)| name == *from)
        .map(|(_, to)| OsStr::new(to))
        .unwrap_or(name)
}

/// Apply the rename table to every component of a relative path
fn renamed_path(relative: &Path) -> PathBuf {
    relative
        .components()
        .map(|component| match component {
            Component::Normal(name) => renamed(name),
            other => other.as_os_str(),
        })
        .collect()
}

/// Get the project root ready for copying
///
/// `Yes` clears everything except `.git`; otherwise a missing root is
/// created and existing contents are left alone.
pub async fn prepare_root(root: &Path, mode: Option<OverwriteMode>) -> Result<()> {
    if mode == Some(OverwriteMode::Yes) && root.exists() {
        let mut entries = fs::read_dir(root)
            .await
            .map_err(|e| ScaffoldError::fs(root, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ScaffoldError::fs(root, e))?
        {
            if entry.file_name() == VCS_DIR {
                continue;
            }
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| ScaffoldError::fs(&path, e))?;
            debug!(path = %path.display(), "removing existing entry");
            let removed = if file_type.is_dir() {
                fs::remove_dir_all(&path).await
            } else {
                fs::remove_file(&path).await
            };
            removed.map_err(|e| ScaffoldError::fs(&path, e))?;
        }
    } else if !root.exists() {
        fs::create_dir_all(root)
            .await
            .map_err(|e| ScaffoldError::fs(root, e))?;
    }

    Ok(())
}

/// Recursively copy `src` to `dest`
///
/// Symbolic links are followed, so their targets' contents are copied rather
/// than the links themselves. Returns the number of files copied.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            ScaffoldError::fs(path, e.into())
        })?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(renamed_path(relative))
        };

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| ScaffoldError::fs(&target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::fs(parent, e))?;
            }
            std::fs::copy(entry.path(), &target).map_err(|e| ScaffoldError::fs(&target, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Overwrite `dest` with literal content
pub async fn write_file(dest: &Path, content: &str) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::fs(parent, e))?;
    }
    fs::write(dest, content)
        .await
        .map_err(|e| ScaffoldError::fs(dest, e))
}

async fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| ScaffoldError::fs(path, e))
}

/// Apply `edit` to a document, returning the patched text
fn patch_document(
    text: &str,
    path: &Path,
    edit: impl FnOnce(&Document) -> std::result::Result<(), String>,
) -> Result<String> {
    let invalid = |message: String| ScaffoldError::InvalidDocument {
        path: path.to_path_buf(),
        message,
    };
    let document = Document::parse(text).map_err(invalid)?;
    edit(&document).map_err(invalid)?;
    Ok(document.to_text())
}

/// Copy a template into `root` and patch its package and devcontainer names
///
/// Returns the top-level entries written to `root`.
pub async fn materialize(
    template_root: &Path,
    root: &Path,
    selection: &Selection,
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    let entries =
        workspace::list(template_root).map_err(|e| ScaffoldError::fs(template_root, e))?;
    for name in entries {
        if SKIPPED_FILES.iter().any(|skipped| name == *skipped) {
            debug!(file = %name.to_string_lossy(), "skipping template file");
            continue;
        }
        let target_name = renamed(&name);
        let count = copy_tree(&template_root.join(&name), &root.join(target_name))?;
        debug!(entry = %target_name.to_string_lossy(), files = count, "copied template entry");
        written.push(target_name.to_string_lossy().into_owned());
    }

    let name = selection.resolved_name();

    let package_path = template_root.join(PACKAGE_JSON);
    let package_text = read_document(&package_path).await?;
    let package_text = patch_document(&package_text, &package_path, |doc| {
        doc.set_string("name", name)?;
        doc.remove("description")?;
        doc.remove("license")
    })?;

    let devcontainer_path = template_root.join(DEVCONTAINER_JSON);
    let devcontainer_text = read_document(&devcontainer_path).await?;
    let devcontainer_text = patch_document(&devcontainer_text, &devcontainer_path, |doc| {
        doc.set_string("name", name)
    })?;

    write_file(&root.join(PACKAGE_JSON), &(package_text + "\n")).await?;
    written.push(PACKAGE_JSON.to_string());
    write_file(&root.join(DEVCONTAINER_JSON), &devcontainer_text).await?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    fn selection(package_name: Option<&str>) -> Selection {
        let found = CATALOG.find_template("react-vite").unwrap();
        Selection {
            target_dir: "My App".to_string(),
            project_name: "My App".to_string(),
            package_name: package_name.map(str::to_string),
            framework: found.framework,
            variant_branch: "react-vite".to_string(),
            overwrite: None,
        }
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    fn read_jsonc(text: &str) -> serde_json::Value {
        jsonc_parser::parse_to_serde_value(text, &crate::templates::jsonc::parse_options())
            .unwrap()
            .unwrap()
    }

    fn template_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "package.json", r#"{"name":"tpl","description":"x"}"#);
        write(root, "a.txt", "hello\n");
        write(root, "_gitignore", "node_modules\n");
        write(root, ".devcontainer/devcontainer.json", r#"{"name":"tpl"}"#);
        write(root, "README.md", "# Template");
        write(root, "yarn.lock", "lock");
        write(root, "package-lock.json", "{}");
        write(root, "TODO.md", "- todo");
        dir
    }

    #[tokio::test]
    async fn test_materialize_copies_and_patches() {
        let template = template_root();
        let out = tempfile::tempdir().unwrap();

        materialize(template.path(), out.path(), &selection(Some("my-app")))
            .await
            .unwrap();

        let root = out.path();
        assert_eq!(std::fs::read_to_string(root.join("a.txt")).unwrap(), "hello\n");
        assert_eq!(
            std::fs::read_to_string(root.join(".gitignore")).unwrap(),
            "node_modules\n"
        );
        assert!(!root.join("_gitignore").exists());

        let package = read_json(&root.join("package.json"));
        assert_eq!(package["name"], "my-app");
        assert!(package.get("description").is_none());

        let devcontainer = read_json(&root.join(".devcontainer/devcontainer.json"));
        assert_eq!(devcontainer["name"], "my-app");

        for absent in ["README.md", "yarn.lock", "package-lock.json", "TODO.md"] {
            assert!(!root.join(absent).exists(), "{} should not be copied", absent);
        }
    }

    #[tokio::test]
    async fn test_materialize_keeps_comments_and_layout() {
        let template = tempfile::tempdir().unwrap();
        write(
            template.path(),
            "package.json",
            r#"{
  // generated
  "name": "tpl",
  "version": "1.0.0",
  "license": "MIT",
  "description": "Template",
  "scripts": {"dev": "vite",},
}

"#,
        );
        write(
            template.path(),
            ".devcontainer/devcontainer.json",
            "{\n  /* container */\n  \"name\": \"tpl\",\n  \"image\": \"node\"\n}\n",
        );
        let out = tempfile::tempdir().unwrap();

        materialize(template.path(), out.path(), &selection(None))
            .await
            .unwrap();

        let package = std::fs::read_to_string(out.path().join("package.json")).unwrap();
        assert!(package.contains("// generated"));
        assert!(package.ends_with("}\n") && !package.ends_with("\n\n"));
        assert!(!package.contains("license") && !package.contains("description"));
        let parsed = read_jsonc(&package);
        assert_eq!(
            parsed,
            serde_json::json!({ "name": "My App", "version": "1.0.0", "scripts": { "dev": "vite" } })
        );
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "version", "scripts"]);

        assert_eq!(
            std::fs::read_to_string(out.path().join(".devcontainer/devcontainer.json")).unwrap(),
            "{\n  /* container */\n  \"name\": \"My App\",\n  \"image\": \"node\"\n}"
        );
    }

    #[tokio::test]
    async fn test_materialize_rejects_non_object_package() {
        let template = tempfile::tempdir().unwrap();
        write(template.path(), "package.json", "[]");
        write(template.path(), ".devcontainer/devcontainer.json", r#"{"name":"tpl"}"#);
        let out = tempfile::tempdir().unwrap();

        let err = materialize(template.path(), out.path(), &selection(None))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidDocument { .. }));
    }

    #[tokio::test]
    async fn test_materialize_requires_devcontainer() {
        let template = tempfile::tempdir().unwrap();
        write(template.path(), "package.json", r#"{"name":"tpl"}"#);
        let out = tempfile::tempdir().unwrap();

        let err = materialize(template.path(), out.path(), &selection(None))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Filesystem { .. }));
    }

    #[test]
    fn test_copy_tree_renames_nested_gitignore() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "web/_gitignore", "dist\n");
        write(src.path(), "web/src/main.ts", "export {};\n");
        let dest = tempfile::tempdir().unwrap();

        let copied = copy_tree(src.path(), &dest.path().join("out")).unwrap();

        assert_eq!(copied, 2);
        let out = dest.path().join("out");
        assert_eq!(
            std::fs::read_to_string(out.join("web/.gitignore")).unwrap(),
            "dist\n"
        );
        assert!(out.join("web/src/main.ts").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_tree_follows_symlinks() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "real.txt", "content");
        std::os::unix::fs::symlink(src.path().join("real.txt"), src.path().join("link.txt"))
            .unwrap();
        let dest = tempfile::tempdir().unwrap();

        copy_tree(src.path(), dest.path()).unwrap();

        let link = dest.path().join("link.txt");
        assert!(!std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(link).unwrap(), "content");
    }

    #[tokio::test]
    async fn test_prepare_root_yes_keeps_git() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "old.txt", "old");
        write(dir.path(), "nested/file.txt", "old");
        write(dir.path(), ".git/HEAD", "ref: refs/heads/main");

        prepare_root(dir.path(), Some(OverwriteMode::Yes))
            .await
            .unwrap();

        assert!(!dir.path().join("old.txt").exists());
        assert!(!dir.path().join("nested").exists());
        assert!(dir.path().join(".git/HEAD").exists());
    }

    #[tokio::test]
    async fn test_prepare_root_ignore_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "old.txt", "old");

        prepare_root(dir.path(), Some(OverwriteMode::Ignore))
            .await
            .unwrap();

        assert!(dir.path().join("old.txt").exists());
    }

    #[tokio::test]
    async fn test_prepare_root_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a/b/c");

        prepare_root(&root, None).await.unwrap();
        assert!(root.is_dir());

        let other = dir.path().join("d");
        prepare_root(&other, Some(OverwriteMode::Yes)).await.unwrap();
        assert!(other.is_dir());
    }
}
