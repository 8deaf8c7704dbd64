/// Device names Windows reserves regardless of extension
pub const RESERVED_NAMES: &[&str; 22] = &[
    "CON", "PRN", "AUX", "NUL",
    "COM1", "COM2", "COM3", "COM4", "COM5",
    "COM6", "COM7", "COM8", "COM9",
    "LPT1", "LPT2", "LPT3", "LPT4", "LPT5",
    "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Split a name into stem and extension at the last period.
///
/// The extension keeps its leading period. Leading periods never start an
/// extension, so `".env"` and `"..."` are all stem.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if !name[..idx].chars().all(|c| c == '.') => name.split_at(idx),
        _ => (name, ""),
    }
}

pub fn is_reserved_name(name: &str) -> bool {
    let (stem, _) = split_extension(name);
    let upper = stem.to_ascii_uppercase();
    RESERVED_NAMES.contains(&upper.as_str())
}

#[inline]
fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Check whether a base name is acceptable on Windows as-is
pub fn is_valid(name: &str) -> bool {
    if is_reserved_name(name) {
        return false;
    }

    if name.ends_with(' ') || name.ends_with('.') {
        return false;
    }

    !name.is_empty() && name.chars().all(is_allowed_char)
}
