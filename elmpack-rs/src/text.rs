//! Text utilities for JavaScript sources.

/// Strips the UTF-8 BOM (byte order mark) from the beginning of text if present.
///
/// The BOM is U+FEFF (0xEF 0xBB 0xBF in UTF-8) and is sometimes present at the
/// start of generated files.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Returns true if `name` is a plain JavaScript identifier (ASCII subset).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
