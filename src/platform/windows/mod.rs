pub mod long_path;

pub use long_path::WindowsPathNormalizer;
