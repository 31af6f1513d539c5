//! Per-entry metadata shown in the details pane.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

/// Maximum number of child names listed in the details text.
pub const MAX_LISTED_CHILDREN: usize = 500;

/// What kind of filesystem object an entry is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Symlink { target: PathBuf },
}

/// Summary of a directory's immediate children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildSummary {
    pub directories: usize,
    pub files: usize,
    /// Child names, directories suffixed with `/`, sorted case-insensitively.
    pub names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EntryDetails {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub permissions: String,
    pub modified: Option<DateTime<Local>>,
    /// `Err` holds the reason the directory could not be listed.
    pub children: Result<ChildSummary, String>,
}

impl EntryDetails {
    /// Collects metadata for `path`.
    ///
    /// # Errors
    /// Returns an error if the entry's own metadata cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let link_meta = fs::symlink_metadata(path)
            .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

        let kind = if link_meta.file_type().is_symlink() {
            let target = fs::read_link(path)
                .with_context(|| format!("Failed to read link {}", path.display()))?;
            EntryKind::Symlink { target }
        } else {
            EntryKind::Directory
        };

        // Report the metadata of what the entry points to.
        let meta = fs::metadata(path).unwrap_or(link_meta);

        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );

        let children = summarize_children(path).map_err(|e| format!("{e:#}"));
        if let Err(reason) = &children {
            tracing::warn!(path = %path.display(), %reason, "cannot list directory contents");
        }

        Ok(Self {
            name,
            path: path.to_path_buf(),
            kind,
            permissions: permissions_string(&meta),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
            children,
        })
    }

    /// Renders the details as display text, one fact per line.
    ///
    /// Single spaces only: word wrapping collapses whitespace runs, so column
    /// padding would not survive the default layout.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Name: {}", self.name),
            format!("Path: {}", self.path.display()),
        ];
        match &self.kind {
            EntryKind::Directory => lines.push("Type: directory".to_string()),
            EntryKind::Symlink { target } => {
                lines.push(format!("Type: symlink -> {}", target.display()));
            }
        }
        lines.push(format!("Permissions: {}", self.permissions));
        lines.push(format!(
            "Modified: {}",
            self.modified.map_or_else(
                || "unknown".to_string(),
                |t| t.format("%Y-%m-%d %H:%M:%S").to_string()
            )
        ));

        match &self.children {
            Ok(summary) => {
                lines.push(format!(
                    "Contents: {} {}, {} {}",
                    summary.directories,
                    plural(summary.directories, "directory", "directories"),
                    summary.files,
                    plural(summary.files, "file", "files"),
                ));
                if !summary.names.is_empty() {
                    lines.push(String::new());
                    let total = summary.directories + summary.files;
                    lines.extend(summary.names.iter().map(|n| format!("- {n}")));
                    if total > summary.names.len() {
                        lines.push(format!("- … and {} more", total - summary.names.len()));
                    }
                }
            }
            Err(reason) => lines.push(format!("Contents: unreadable ({reason})")),
        }

        lines.join("\n")
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn summarize_children(path: &Path) -> Result<ChildSummary> {
    let read_dir = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory {}", path.display()))?;

    let mut summary = ChildSummary::default();
    for entry in read_dir.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() {
            summary.directories += 1;
            summary.names.push(format!("{name}/"));
        } else {
            summary.files += 1;
            summary.names.push(name);
        }
    }
    summary.names.sort_by_key(|n| n.to_lowercase());
    summary.names.truncate(MAX_LISTED_CHILDREN);
    Ok(summary)
}

#[cfg(unix)]
fn permissions_string(meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    let mut out = String::with_capacity(10);
    out.push(if meta.is_dir() { 'd' } else { '-' });
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn permissions_string(meta: &Metadata) -> String {
    if meta.permissions().readonly() {
        "read-only".to_string()
    } else {
        "read-write".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_counts_children() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("project");
        fs::create_dir(&target).unwrap();
        fs::create_dir(target.join("src")).unwrap();
        fs::write(target.join("README.md"), "hi").unwrap();
        fs::write(target.join("Cargo.toml"), "").unwrap();

        let details = EntryDetails::load(&target).unwrap();
        assert_eq!(details.name, "project");
        assert_eq!(details.kind, EntryKind::Directory);

        let summary = details.children.as_ref().unwrap();
        assert_eq!(summary.directories, 1);
        assert_eq!(summary.files, 2);
        assert_eq!(summary.names, vec!["Cargo.toml", "README.md", "src/"]);
    }

    #[test]
    fn test_to_text_lists_facts_and_children() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("empty");
        fs::create_dir(&target).unwrap();
        fs::create_dir(target.join("one")).unwrap();

        let text = EntryDetails::load(&target).unwrap().to_text();
        assert!(text.starts_with("Name: empty\n"));
        assert!(text.contains("Type: directory"));
        assert!(text.contains("Contents: 1 directory, 0 files"));
        assert!(text.ends_with("\n- one/"));
    }

    #[test]
    fn test_to_text_has_no_whitespace_runs() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("tree");
        fs::create_dir(&target).unwrap();
        fs::create_dir(target.join("leaf")).unwrap();

        // Every line must read the same under word wrapping.
        let text = EntryDetails::load(&target).unwrap().to_text();
        for line in text.lines() {
            assert!(!line.contains("  "), "padded line: {line:?}");
            assert_eq!(line.trim_start(), line);
        }
    }

    #[test]
    fn test_load_missing_path_is_error() {
        let dir = tempdir().unwrap();
        assert!(EntryDetails::load(&dir.path().join("gone")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_string_for_directory() {
        let dir = tempdir().unwrap();
        let details = EntryDetails::load(dir.path()).unwrap();
        assert_eq!(details.permissions.len(), 10);
        assert!(details.permissions.starts_with('d'));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_reports_target() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

        let details = EntryDetails::load(&dir.path().join("alias")).unwrap();
        assert_eq!(
            details.kind,
            EntryKind::Symlink {
                target: dir.path().join("real")
            }
        );
        assert!(details.to_text().contains("symlink -> "));
    }
}
