use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::platform::traits::{DirEntry, EntryKind, FileSystem};

#[cfg(windows)]
use crate::platform::traits::PathNormalizer;
#[cfg(windows)]
use crate::platform::windows::WindowsPathNormalizer;

/// `std::fs` backed filesystem, with long path support on Windows
pub struct LocalFileSystem {
    #[cfg(windows)]
    normalizer: WindowsPathNormalizer,
}

impl LocalFileSystem {
    pub fn new() -> Self {
        Self {
            #[cfg(windows)]
            normalizer: WindowsPathNormalizer,
        }
    }

    #[cfg(windows)]
    fn normalize(&self, path: &Path) -> std::path::PathBuf {
        // Rename targets do not exist yet, so normalize through the parent
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => self.normalizer.normalize(parent).join(name),
            _ => self.normalizer.normalize(path),
        }
    }

    #[cfg(not(windows))]
    fn normalize<'a>(&self, path: &'a Path) -> &'a Path {
        path
    }
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFileSystem {
    fn read_dir(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();

        let listing = std::fs::read_dir(self.normalize(dir))
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;

        for entry in listing {
            let entry = entry
                .with_context(|| format!("Failed to read entry in {}", dir.display()))?;
            let path = dir.join(entry.file_name());

            let file_type = entry.file_type()
                .with_context(|| format!("Failed to get file type of {}", path.display()))?;

            let (kind, descend) = if file_type.is_dir() {
                (EntryKind::Directory, true)
            } else if file_type.is_symlink() {
                // Links to directories are renamed like directories but not followed
                let points_to_dir = std::fs::metadata(&path)
                    .map(|m| m.is_dir())
                    .unwrap_or(false);
                if points_to_dir {
                    debug!("Not following directory link: {}", path.display());
                    (EntryKind::Directory, false)
                } else {
                    (EntryKind::File, false)
                }
            } else {
                (EntryKind::File, false)
            };

            entries.push(DirEntry {
                name: entry.file_name(),
                path,
                kind,
                descend,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(self.normalize(path)).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        std::fs::rename(self.normalize(from), self.normalize(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_dir_classifies_and_sorts() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("b_dir")).unwrap();
        std::fs::write(temp.path().join("c.txt"), b"c").unwrap();
        std::fs::write(temp.path().join("a.txt"), b"a").unwrap();

        let fs = LocalFileSystem::new();
        let entries = fs.read_dir(temp.path()).unwrap();

        let names: Vec<_> = entries.iter()
            .map(|e| e.name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b_dir", "c.txt"]);

        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[1].kind, EntryKind::Directory);
        assert!(entries[1].descend);
        assert_eq!(entries[1].path, temp.path().join("b_dir"));
    }

    #[test]
    fn test_read_dir_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFileSystem::new();

        let result = fs.read_dir(&temp.path().join("missing"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read directory"));
    }

    #[test]
    fn test_exists_and_rename() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("old name.txt");
        let to = temp.path().join("old_name.txt");
        std::fs::write(&from, b"data").unwrap();

        let fs = LocalFileSystem::new();
        assert!(fs.exists(&from));
        assert!(!fs.exists(&to));

        fs.rename(&from, &to).unwrap();

        assert!(!fs.exists(&from));
        assert!(fs.exists(&to));
        assert_eq!(std::fs::read(&to).unwrap(), b"data");
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlink_is_not_descended() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let fs = LocalFileSystem::new();
        let entries = fs.read_dir(temp.path()).unwrap();

        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert_eq!(link.kind, EntryKind::Directory);
        assert!(!link.descend);
    }
}
