//! Directory scanning.
//!
//! Lists the subdirectories of a directory. Plain files are never returned:
//! the browser only navigates the directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

/// A subdirectory found while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name (last path component), lossily converted to UTF-8.
    pub name: String,
    /// Full path of the entry.
    pub path: PathBuf,
    /// True when the entry is a symlink that resolves to a directory.
    pub is_symlink: bool,
}

impl DirEntry {
    /// Returns true for dot-directories.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Reads the subdirectories of `dir`, sorted case-insensitively by name.
///
/// Symlinks are followed to decide whether they point at a directory;
/// dangling links are dropped. Children whose metadata cannot be read are
/// skipped (they usually vanished mid-scan).
///
/// # Errors
/// Returns an error if `dir` itself cannot be read.
pub fn read_subdirectories(dir: &Path, show_hidden: bool) -> Result<Vec<DirEntry>> {
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .hidden(!show_hidden)
        .max_depth(Some(1))
        .build();

    let mut entries = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            // Depth 0 is `dir` itself.
            Err(err) if err.depth().is_none_or(|depth| depth == 0) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("Failed to read directory {}", dir.display())));
            }
            Err(err) => {
                tracing::debug!(%err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let Some(file_type) = entry.file_type() else {
            continue;
        };
        let is_symlink = file_type.is_symlink();
        let is_dir = if is_symlink {
            fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };

        if is_dir {
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
                is_symlink,
            });
        }
    }

    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    tracing::debug!(dir = %dir.display(), count = entries.len(), "scanned directory");
    Ok(entries)
}

/// Resolves a user supplied start path to an absolute directory.
///
/// # Errors
/// Returns an error if the path does not exist or is not a directory.
pub fn resolve_start_dir(path: &Path) -> Result<PathBuf> {
    let resolved = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    if !resolved.is_dir() {
        anyhow::bail!("{} is not a directory", resolved.display());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn names(entries: &[DirEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_lists_only_directories_sorted_case_insensitively() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        fs::create_dir(dir.path().join("Alpha")).unwrap();
        fs::create_dir(dir.path().join("gamma")).unwrap();
        fs::write(dir.path().join("file.txt"), "x").unwrap();

        let entries = read_subdirectories(dir.path(), false).unwrap();
        assert_eq!(names(&entries), vec!["Alpha", "beta", "gamma"]);
        assert!(entries.iter().all(|e| !e.is_symlink));
    }

    #[test]
    fn test_hidden_directories_respect_flag() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();

        let visible = read_subdirectories(dir.path(), false).unwrap();
        assert_eq!(names(&visible), vec!["src"]);

        let all = read_subdirectories(dir.path(), true).unwrap();
        assert_eq!(names(&all), vec![".git", "src"]);
        assert!(all[0].is_hidden());
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(read_subdirectories(dir.path(), true).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempdir().unwrap();
        let err = read_subdirectories(&dir.path().join("missing"), false).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_listed() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("target")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling"))
            .unwrap();

        let entries = read_subdirectories(dir.path(), false).unwrap();
        assert_eq!(names(&entries), vec!["link", "target"]);
        assert!(entries[0].is_symlink);
    }

    #[test]
    fn test_resolve_start_dir_rejects_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        assert!(resolve_start_dir(dir.path()).unwrap().is_absolute());
        let err = resolve_start_dir(&file).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }
}
