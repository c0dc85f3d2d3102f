//! Directory existence and emptiness checks

use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Version-control metadata directory, ignored when judging emptiness
pub const VCS_DIR: &str = ".git";

pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// A directory is empty when it has no entries, or only a `.git` directory
pub fn is_empty(path: &Path) -> io::Result<bool> {
    let entries = list(path)?;
    Ok(match entries.as_slice() {
        [] => true,
        [only] => only == VCS_DIR,
        _ => false,
    })
}

/// Entry names of a directory, sorted for deterministic processing
pub fn list(path: &Path) -> io::Result<Vec<OsString>> {
    let mut names = std::fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(exists(dir.path()));
        assert!(is_empty(dir.path()).unwrap());
    }

    #[test]
    fn test_git_only_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(is_empty(dir.path()).unwrap());
    }

    #[test]
    fn test_directory_with_file_is_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("old.txt"), "x").unwrap();
        assert!(!is_empty(dir.path()).unwrap());

        std::fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(!is_empty(dir.path()).unwrap());
    }

    #[test]
    fn test_list_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b", "a", "c"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        assert_eq!(list(dir.path()).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(!exists(&missing));
        assert!(is_empty(&missing).is_err());
    }
}
