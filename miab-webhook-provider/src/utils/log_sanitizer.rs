//! Log sanitization utilities
//!
//! Keeps response bodies (which may be whole HTML error pages) short and on one
//! line, and keeps challenge tokens out of info-level logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;
/// Characters of a secret value left visible by [`mask_value`].
const MASK_VISIBLE: usize = 4;

/// Truncate a response body for safe logging.
///
/// Line breaks are collapsed to spaces; bodies longer than `TRUNCATE_LIMIT`
/// bytes are cut on a char boundary and suffixed with the original length.
pub fn truncate_for_log(s: &str) -> String {
    let single_line: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if single_line.len() <= TRUNCATE_LIMIT {
        return single_line;
    }

    let mut end = TRUNCATE_LIMIT;
    while !single_line.is_char_boundary(end) {
        end -= 1;
    }
    format!(
        "{}... [truncated, total {} bytes]",
        &single_line[..end],
        s.len()
    )
}

/// Mask a secret-ish value (challenge key, password) for logging.
///
/// `"abcdefghijkl"` becomes `"abcd…(12)"`; values of `MASK_VISIBLE` chars or
/// fewer are fully hidden.
pub fn mask_value(s: &str) -> String {
    let len = s.chars().count();
    if len <= MASK_VISIBLE {
        return format!("…({len})");
    }
    let prefix: String = s.chars().take(MASK_VISIBLE).collect();
    format!("{prefix}…({len})")
}
