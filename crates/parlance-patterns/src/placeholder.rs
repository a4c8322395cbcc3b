//! Placeholder body parsing.
//!
//! A placeholder body follows `[-] baseName [@ time]`: a leading `-` marks
//! the slot optional and an `@N` suffix requests a tense shift (`-1` past,
//! `0` present, `1` future). Pluralization of the base name is a host rule
//! and happens outside this crate.

use crate::error::PatternError;

/// Parsed form of one `%…%` placeholder body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpec {
    /// The base name, still in whatever plurality the pattern used.
    pub name: String,
    /// Whether the slot carried the `-` optional marker.
    pub optional: bool,
    /// Requested tense shift; `0` when no `@` suffix was present.
    pub time: i32,
}

/// Parse the placeholder delimited by the `%` markers at `start` and `end`.
///
/// # Errors
/// Returns [`PatternError::EmptyPlaceholder`] when the body has no name and
/// [`PatternError::InvalidTime`] when an `@` suffix is not an integer.
pub fn parse_placeholder(
    pattern: &str,
    start: usize,
    end: usize,
) -> Result<PlaceholderSpec, PatternError> {
    let body = pattern.get(start + 1..end).unwrap_or_default();
    let (optional, rest) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let (name, time) = match rest.rsplit_once('@') {
        Some((name, suffix)) => {
            let time = suffix.trim().parse::<i32>().map_err(|_| PatternError::InvalidTime {
                modifier: suffix.to_string(),
                placeholder: body.to_string(),
            })?;
            (name, time)
        }
        None => (rest, 0),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(PatternError::EmptyPlaceholder {
            position: start,
            pattern: pattern.to_string(),
        });
    }
    Ok(PlaceholderSpec {
        name: name.to_string(),
        optional,
        time,
    })
}
