use crate::core::validation::split_extension;

/// Character substituted for anything outside the allowed set
pub const DEFAULT_REPLACEMENT: char = '_';

/// Stem used when nothing survives sanitization
pub const FALLBACK_STEM: &str = "unnamed_file";

/// Replace characters Windows (or this tool) will not accept in a name.
///
/// The stem keeps ASCII letters, digits, `_` and `-`; the extension keeps
/// ASCII letters, digits and periods. Everything else becomes `replacement`,
/// one for one. Reserved device names pass through unchanged.
pub fn sanitize(name: &str, replacement: char) -> String {
    let (stem, extension) = split_extension(name);

    let sanitized_stem: String = stem
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c,
            '_' | '-' => c,
            _ => replacement,
        })
        .collect();

    let sanitized_stem = sanitized_stem.trim_matches([' ', '.']);

    let sanitized_stem = if sanitized_stem.is_empty() {
        FALLBACK_STEM
    } else {
        sanitized_stem
    };

    let sanitized_extension: String = extension
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c,
            '.' => c,
            _ => replacement,
        })
        .collect();

    format!("{}{}", sanitized_stem, sanitized_extension)
}
