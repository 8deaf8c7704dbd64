use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Path normalization for platform-specific requirements
pub trait PathNormalizer {
    /// Normalize path for the platform (e.g., Windows long path support)
    fn normalize(&self, path: &Path) -> PathBuf;
}

/// Kind of a directory entry as seen by the renamer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }
}

/// A single entry of a directory listing
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: OsString,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Whether traversal recurses into this entry (false for links)
    pub descend: bool,
}

/// File system operations abstraction
pub trait FileSystem {
    /// List the immediate children of a directory
    fn read_dir(&self, dir: &Path) -> Result<Vec<DirEntry>>;

    /// Whether anything (including a dangling link) occupies the path
    fn exists(&self, path: &Path) -> bool;

    /// Rename an entry in place
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;
}
