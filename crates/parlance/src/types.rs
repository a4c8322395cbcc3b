//! Core data types and the top-level error enum.

use parlance_patterns::PatternError;
use thiserror::Error;

/// Fully resolved descriptor of one placeholder slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarInfo {
    /// Singular name of the required type.
    pub type_name: String,
    /// Whether the pattern asked for the plural form.
    pub is_plural: bool,
    /// Requested tense shift: `-1` past, `0` present, `1` future.
    pub time: i32,
}

/// Fatal failures of a parse request.
///
/// These are author or API errors, surfaced to the host distinctly from
/// user input errors (which flow through the diagnostic sink and the
/// quality ranking instead).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A registered pattern is malformed.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// A pattern or parse request names a type that is not registered.
    #[error("unknown type '{type_name}' referenced by \"{referrer}\"")]
    UnknownType {
        /// The unresolved singular type name.
        type_name: String,
        /// The pattern or request that referenced it.
        referrer: String,
    },
    /// An unbound non-optional slot has no registered default expression.
    #[error("the type '{type_name}' does not provide a default expression, required by pattern \"{pattern}\"")]
    MissingDefault {
        /// Type of the unbound slot.
        type_name: String,
        /// The pattern whose slot went unbound.
        pattern: String,
    },
    /// A registered default expression contradicts the slot that needs it.
    #[error("the default expression of '{type_name}' is incompatible with pattern \"{pattern}\": {reason}")]
    IncompatibleDefault {
        /// Type of the unbound slot.
        type_name: String,
        /// The pattern whose slot went unbound.
        pattern: String,
        /// Why the default cannot be used.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_pattern_errors_transparently() {
        let err = ParseError::from(PatternError::EmptyInput);
        assert_eq!(err.to_string(), "cannot parse an empty string");
    }

    #[test]
    fn missing_default_names_type_and_pattern() {
        let err = ParseError::MissingDefault {
            type_name: "world".into(),
            pattern: "[the] world [of %world%]".into(),
        };
        assert!(err.to_string().contains("'world'"));
        assert!(err.to_string().contains("[the] world [of %world%]"));
    }
}
