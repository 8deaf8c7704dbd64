use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::core::sanitize::{sanitize, DEFAULT_REPLACEMENT};
use crate::core::validation::{is_valid, split_extension};
use crate::platform::{DirEntry, EntryKind, FileSystem};

/// A rename that went through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRecord {
    pub kind: EntryKind,
    pub old_path: PathBuf,
    pub new_path: PathBuf,
}

/// A rename the filesystem refused
#[derive(Debug)]
pub struct RenameFailure {
    pub kind: EntryKind,
    pub old_path: PathBuf,
    pub attempted_path: PathBuf,
    pub error: std::io::Error,
}

/// Outcome of one run over a tree
#[derive(Debug, Default)]
pub struct RenameReport {
    /// Successful renames, in the order they were performed
    pub renamed: Vec<RenameRecord>,
    pub failed: Vec<RenameFailure>,
    pub entries_checked: u64,
}

/// Fails unless `root` exists and is a directory
pub fn ensure_directory(root: &Path) -> Result<()> {
    if !root.exists() {
        bail!("Directory {} does not exist.", root.display());
    }

    if !root.is_dir() {
        bail!("Path {} is not a directory.", root.display());
    }

    Ok(())
}

/// Renames every entry under a root whose name Windows would reject
pub struct TreeRenamer<F: FileSystem> {
    fs: F,
    replacement: char,
}

impl<F: FileSystem> TreeRenamer<F> {
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            replacement: DEFAULT_REPLACEMENT,
        }
    }

    pub fn with_replacement(mut self, replacement: char) -> Self {
        self.replacement = replacement;
        self
    }

    /// Walk `root` bottom-up and rename invalid entries.
    ///
    /// The root itself is never renamed. A failed rename is logged and
    /// recorded; a failed directory listing aborts the run.
    pub fn process(&self, root: &Path) -> Result<RenameReport> {
        ensure_directory(root)?;

        let root = dunce::canonicalize(root)
            .with_context(|| format!("Failed to resolve directory {}", root.display()))?;

        let mut report = RenameReport::default();
        self.walk(&root, &mut report)?;

        Ok(report)
    }

    fn walk(&self, dir: &Path, report: &mut RenameReport) -> Result<()> {
        // Listed once up front; children are renamed while this listing is still accurate
        let entries = self.fs.read_dir(dir)?;

        for entry in &entries {
            if entry.kind == EntryKind::Directory && entry.descend {
                self.walk(&entry.path, report)?;
            }
        }

        let (directories, files): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| e.kind == EntryKind::Directory);

        for entry in files.iter().chain(directories.iter()) {
            self.process_entry(dir, entry, report);
        }

        Ok(())
    }

    fn process_entry(&self, dir: &Path, entry: &DirEntry, report: &mut RenameReport) {
        report.entries_checked += 1;

        let name = entry.name.to_string_lossy();
        if is_valid(&name) {
            debug!("Valid {} name: {}", entry.kind.label(), entry.path.display());
            return;
        }

        let candidate = sanitize(&name, self.replacement);
        let new_path = self.resolve_collision(dir, &candidate, entry.kind);

        match self.fs.rename(&entry.path, &new_path) {
            Ok(()) => {
                info!(
                    "Renamed {}: {} -> {}",
                    entry.kind.label(),
                    entry.path.display(),
                    new_path.display()
                );
                report.renamed.push(RenameRecord {
                    kind: entry.kind,
                    old_path: entry.path.clone(),
                    new_path,
                });
            }
            Err(e) => {
                error!(
                    "Failed to rename {} to {}: {}",
                    entry.path.display(),
                    new_path.display(),
                    e
                );
                report.failed.push(RenameFailure {
                    kind: entry.kind,
                    old_path: entry.path.clone(),
                    attempted_path: new_path,
                    error: e,
                });
            }
        }
    }

    /// First free path for `candidate` in `dir`, adding `_N` as needed.
    ///
    /// Files take the suffix before their extension, directories after the
    /// whole name.
    fn resolve_collision(&self, dir: &Path, candidate: &str, kind: EntryKind) -> PathBuf {
        let (base, extension) = match kind {
            EntryKind::File => split_extension(candidate),
            EntryKind::Directory => (candidate, ""),
        };

        let mut path = dir.join(candidate);
        let mut counter: u64 = 1;

        while self.fs.exists(&path) {
            path = dir.join(format!("{}_{}{}", base, counter, extension));
            counter += 1;
        }

        path
    }
}
