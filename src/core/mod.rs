pub mod renamer;
pub mod sanitize;
pub mod validation;

pub use renamer::{ensure_directory, RenameFailure, RenameRecord, RenameReport, TreeRenamer};
pub use sanitize::{sanitize, DEFAULT_REPLACEMENT};
pub use validation::{is_reserved_name, is_valid, split_extension};
