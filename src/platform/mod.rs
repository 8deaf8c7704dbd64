pub mod local;
pub mod traits;

#[cfg(windows)]
pub mod windows;

pub use local::LocalFileSystem;
pub use traits::{DirEntry, EntryKind, FileSystem, PathNormalizer};
