//! Byte-cursor scanning over pattern and input text.
//!
//! Patterns use `\` to escape the next character unconditionally; input text
//! uses `""` inside a quoted region as an embedded quote. All offsets are
//! byte offsets into the scanned string.

use crate::error::PatternError;

/// Find the close bracket balancing the `open` bracket at `from`.
///
/// Scanning starts just after `from`. Nested bracket pairs of the same kind
/// are skipped; a `\` consumes the following byte.
///
/// # Errors
/// Returns [`PatternError::Unbalanced`] when the pattern ends before the
/// balancing bracket, and [`PatternError::DanglingEscape`] when the pattern
/// ends with a bare `\`.
///
/// # Examples
/// ```
/// use parlance_patterns::next_matching;
///
/// assert_eq!(next_matching("a [b [c]] d", b'[', b']', 2).ok(), Some(8));
/// ```
pub fn next_matching(
    pattern: &str,
    open: u8,
    close: u8,
    from: usize,
) -> Result<usize, PatternError> {
    let bytes = pattern.as_bytes();
    let mut depth = 0usize;
    let mut j = from + 1;
    while let Some(&b) = bytes.get(j) {
        if b == b'\\' {
            if bytes.get(j + 1).is_none() {
                return Err(PatternError::DanglingEscape(pattern.to_string()));
            }
            j += 2;
        } else if b == open {
            depth += 1;
            j += 1;
        } else if b == close {
            if depth == 0 {
                return Ok(j);
            }
            depth -= 1;
            j += 1;
        } else {
            j += 1;
        }
    }
    Err(PatternError::Unbalanced {
        open: char::from(open),
        position: from,
        pattern: pattern.to_string(),
    })
}

/// Find the next unescaped occurrence of `target` at or after `from`.
#[must_use]
pub fn next_unescaped(pattern: &str, target: u8, from: usize) -> Option<usize> {
    let bytes = pattern.as_bytes();
    let mut j = from;
    while let Some(&b) = bytes.get(j) {
        if b == b'\\' {
            j += 2;
        } else if b == target {
            return Some(j);
        } else {
            j += 1;
        }
    }
    None
}

/// Split the alternation group delimited by `open`..`close` into the byte
/// spans of its `|`-separated alternatives.
///
/// `open` must hold the group's `(` and `close` its balancing `)`. Nested
/// bracket groups are opaque: a `|` inside them does not split.
///
/// # Errors
/// Returns an error when a nested group inside the alternation is itself
/// unbalanced.
pub fn split_alternation(
    pattern: &str,
    open: usize,
    close: usize,
) -> Result<Vec<(usize, usize)>, PatternError> {
    let bytes = pattern.as_bytes();
    let mut spans = Vec::new();
    let mut start = open + 1;
    let mut j = start;
    while j < close {
        match bytes.get(j) {
            Some(b'\\') => j += 2,
            Some(b'(') => j = next_matching(pattern, b'(', b')', j)? + 1,
            Some(b'[') => j = next_matching(pattern, b'[', b']', j)? + 1,
            Some(b'|') => {
                spans.push((start, j));
                start = j + 1;
                j += 1;
            }
            _ => j += 1,
        }
    }
    spans.push((start, close));
    Ok(spans)
}

/// Find the `)` closing the alternation group that encloses `from`.
///
/// Used when matching reaches a `|`: the rest of the current alternative is
/// consumed by jumping past the group. Escapes are honoured and nested
/// parenthesised groups are skipped.
///
/// # Errors
/// Returns [`PatternError::Unbalanced`] when no enclosing `)` exists.
pub fn end_of_group(pattern: &str, from: usize) -> Result<usize, PatternError> {
    let bytes = pattern.as_bytes();
    let mut depth = 0usize;
    let mut j = from;
    while let Some(&b) = bytes.get(j) {
        match b {
            b'\\' => j += 2,
            b'(' => {
                depth += 1;
                j += 1;
            }
            b')' => {
                if depth == 0 {
                    return Ok(j);
                }
                depth -= 1;
                j += 1;
            }
            _ => j += 1,
        }
    }
    Err(PatternError::Unbalanced {
        open: '(',
        position: from,
        pattern: pattern.to_string(),
    })
}

/// Find the quote closing the region opened just before `from` in input
/// text.
///
/// A `""` digraph is an embedded quote and does not terminate the region.
/// Returns the byte offset of the closing `"`, or `None` when the region is
/// unclosed.
///
/// # Examples
/// ```
/// use parlance_patterns::next_unescaped_quote;
///
/// assert_eq!(next_unescaped_quote(r#""say ""hi"" now""#, 1), Some(15));
/// ```
#[must_use]
pub fn next_unescaped_quote(input: &str, from: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut i = from;
    while let Some(&b) = bytes.get(i) {
        if b == b'"' {
            if bytes.get(i + 1) == Some(&b'"') {
                i += 2;
            } else {
                return Some(i);
            }
        } else {
            i += 1;
        }
    }
    None
}
