//! Author-error types for registered patterns.

use thiserror::Error;

/// Errors caused by a malformed registered pattern.
///
/// These are programmer bugs in the patterns handed to the parser, not user
/// input errors, and they abort the whole parse attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// An opening bracket has no balancing close bracket.
    #[error("unbalanced '{open}' at byte {position} in pattern \"{pattern}\"")]
    Unbalanced {
        /// The bracket that was left open.
        open: char,
        /// Byte offset of the opening bracket.
        position: usize,
        /// The offending pattern text.
        pattern: String,
    },
    /// The pattern ends with a bare `\`.
    #[error("pattern \"{0}\" ends with an escape character")]
    DanglingEscape(String),
    /// A `%` placeholder marker has no closing `%`.
    #[error("odd number of '%' in pattern \"{0}\"")]
    UnclosedPlaceholder(String),
    /// A placeholder body is empty or reduces to an empty name.
    #[error("empty placeholder at byte {position} in pattern \"{pattern}\"")]
    EmptyPlaceholder {
        /// Byte offset of the opening `%`.
        position: usize,
        /// The offending pattern text.
        pattern: String,
    },
    /// A `@time` suffix is not a valid integer.
    #[error("invalid tense modifier \"@{modifier}\" in placeholder \"{placeholder}\"")]
    InvalidTime {
        /// The unparseable suffix text.
        modifier: String,
        /// The placeholder body it appeared in.
        placeholder: String,
    },
    /// A `<` regex slot has no closing `>`.
    #[error("missing '>' for regex slot at byte {position} in pattern \"{pattern}\"")]
    UnclosedRegex {
        /// Byte offset of the opening `<`.
        position: usize,
        /// The offending pattern text.
        pattern: String,
    },
    /// The source inside a `<…>` slot is not a valid regular expression.
    #[error(transparent)]
    Regex(#[from] regex::Error),
    /// The input handed to the parser was empty; patterns never match the
    /// empty string.
    #[error("cannot parse an empty string")]
    EmptyInput,
}
