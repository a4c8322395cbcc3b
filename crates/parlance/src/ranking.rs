//! Error-quality ranking shared across nested parse attempts.
//!
//! Every failed resolution proposes a diagnostic tagged with a quality; a
//! single best-error slot keeps the most informative one. Replacement is
//! strict-greater so the earliest diagnostic wins on ties.

/// How informative a parse diagnostic is, totally ordered low to high.
///
/// # Examples
/// ```
/// use parlance::ErrorQuality;
///
/// assert!(ErrorQuality::None < ErrorQuality::NotAVariable);
/// assert!(ErrorQuality::WrongType < ErrorQuality::Semantic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ErrorQuality {
    /// No diagnostic recorded.
    #[default]
    None,
    /// The text could not be understood as a value of the requested type.
    NotAVariable,
    /// The text parsed as a variable, but not of the requested type.
    WrongType,
    /// The text parsed, but violates a semantic rule (plurality, tense).
    /// Terminal: it always surfaces and aborts the search.
    Semantic,
}

/// The shared best-error slot of one parse attempt.
#[derive(Debug, Default)]
pub(crate) struct BestError {
    pub(crate) quality: ErrorQuality,
    pub(crate) message: Option<String>,
}

impl BestError {
    /// Record `message` if `quality` strictly exceeds the current best.
    pub(crate) fn submit(&mut self, quality: ErrorQuality, message: impl Into<String>) {
        if quality > self.quality {
            self.quality = quality;
            self.message = Some(message.into());
        }
    }

    /// Adopt another slot's diagnostic if it is strictly better.
    pub(crate) fn promote(&mut self, other: Self) {
        if other.quality > self.quality {
            *self = other;
        }
    }
}
