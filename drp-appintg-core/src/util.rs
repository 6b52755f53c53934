/// Split a comma-separated option value into trimmed, non-empty items.
///
/// `"filename, filter ,ccd"` becomes `["filename", "filter", "ccd"]`.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// True if `s` can be spliced into SQL as a column name.
pub fn is_sql_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// True if `s` is safe to embed inside a single-quoted SQL literal.
///
/// Only ASCII letters, digits and `_ . + -` are accepted. Filter names, visit
/// numbers and visit tags all fit this set.
pub fn is_safe_literal(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'))
}

/// True if `s` is a plain decimal integer, as blacklist reason codes are.
pub fn is_reason_code(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
