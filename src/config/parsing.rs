/// What: Remove an inline comment from a configuration value.
///
/// Inputs:
/// - `s`: Raw value that may end with `# comment` or `// comment`.
///
/// Output:
/// - Comment-free & trimmed substring of the input.
///
/// Details:
/// - A marker only starts a comment at the beginning of the value or after
///   whitespace, so URLs (`http://host/#x`) survive intact.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut cut = s.len();
    for (i, ch) in s.char_indices() {
        let at_boundary = i == 0 || bytes[i - 1].is_ascii_whitespace();
        if !at_boundary {
            continue;
        }
        if ch == '#' || s[i..].starts_with("//") {
            cut = i;
            break;
        }
    }
    s[..cut].trim()
}

/// What: Split a `key = value` line into a normalised key and a comment-free value.
///
/// Inputs:
/// - `line`: One line of a settings file.
///
/// Output:
/// - `Some((key, value))` for assignment lines; `None` for blanks, comments and other lines.
///
/// Details:
/// - Keys are lowercased with `.`, `-` and spaces mapped to `_`.
pub(crate) fn split_assignment(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return None;
    }
    let (raw_key, val_raw) = trimmed.split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    Some((key, strip_inline_comment(val_raw.trim())))
}
