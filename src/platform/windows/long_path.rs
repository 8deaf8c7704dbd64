use crate::platform::traits::PathNormalizer;
use std::path::{Path, PathBuf};

/// Windows long path limit
const WINDOWS_MAX_PATH: usize = 260;

/// Headroom left for the name a rename appends to a directory
const RENAME_HEADROOM: usize = 50;

/// Windows extended path prefix
const EXTENDED_PATH_PREFIX: &str = r"\\?\";

/// Adds the extended prefix to existing paths close to `MAX_PATH`
pub struct WindowsPathNormalizer;

impl WindowsPathNormalizer {
    fn to_extended(absolute: &str) -> PathBuf {
        if let Some(unc) = absolute.strip_prefix(r"\\") {
            PathBuf::from(format!(r"\\?\UNC\{}", unc))
        } else {
            PathBuf::from(format!("{}{}", EXTENDED_PATH_PREFIX, absolute))
        }
    }
}

impl PathNormalizer for WindowsPathNormalizer {
    fn normalize(&self, path: &Path) -> PathBuf {
        if path.to_string_lossy().starts_with(EXTENDED_PATH_PREFIX) {
            return path.to_path_buf();
        }

        // Canonicalize only works for paths that exist
        let absolute = match dunce::canonicalize(path) {
            Ok(absolute) => absolute,
            Err(e) => {
                tracing::debug!("Cannot canonicalize '{}': {}", path.display(), e);
                return path.to_path_buf();
            }
        };

        let absolute_str = absolute.to_string_lossy();
        if absolute_str.len() > WINDOWS_MAX_PATH - RENAME_HEADROOM {
            tracing::debug!(
                "Path length {} close to MAX_PATH, using extended prefix",
                absolute_str.len()
            );
            Self::to_extended(&absolute_str)
        } else {
            absolute
        }
    }
}
