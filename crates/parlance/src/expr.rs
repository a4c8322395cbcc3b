//! The runtime expression surface and the literal leaf types.
//!
//! The parser never evaluates anything: it produces trait objects that the
//! host evaluates later. [`Expr`] is the seam between the two worlds, and
//! the two literal types are the leaves every placeholder ultimately
//! bottoms out in.

use std::any::Any;
use std::fmt;

use crate::diagnostics::ParseLog;
use crate::matcher::RegexMatch;
use crate::registry::TypeDef;

/// One placeholder binding: a resolved sub-expression, or unbound for an
/// absent optional slot.
pub type Slot = Option<Box<dyn Expr>>;

/// A runtime expression produced by a definition's factory.
pub trait Expr: fmt::Debug {
    /// Called once after pattern matching with the resolved bindings, the
    /// index of the pattern that matched, and the raw regex-slot matches.
    /// Returning `false` rejects the match silently; logging an error to
    /// `log` first makes the rejection final and surfaced.
    fn init(
        &mut self,
        args: Vec<Slot>,
        pattern_index: usize,
        regexes: &[RegexMatch],
        log: &mut ParseLog,
    ) -> bool {
        let _ = (args, pattern_index, regexes, log);
        true
    }

    /// Whether this expression yields exactly one value.
    fn is_single(&self) -> bool;

    /// Switch the expression to a past (`-1`) or future (`1`) view.
    /// Returns `false` when the expression has no such state.
    fn set_time(&mut self, time: i32) -> bool {
        time == 0
    }

    /// Called when the expression is substituted as a slot default.
    /// Returning `false` rejects the pattern silently.
    fn init_default(&mut self) -> bool {
        true
    }

    /// Produce a view of this expression as `target`, or `None` when no
    /// conversion exists.
    fn convert(&self, target: &TypeDef) -> Option<Box<dyn Expr>> {
        let _ = target;
        None
    }

    /// Human-readable rendering used in diagnostics.
    fn describe(&self) -> String;
}

/// An event instance constructed by an event definition's factory.
///
/// Event headers parse with nested variables disabled, so the slots handed
/// to `init` are always literals.
pub trait EventData: fmt::Debug {
    /// Called once after pattern matching; returning `false` rejects the
    /// match like [`Expr::init`].
    fn init(
        &mut self,
        args: Vec<Slot>,
        pattern_index: usize,
        regexes: &[RegexMatch],
        log: &mut ParseLog,
    ) -> bool {
        let _ = (args, pattern_index, regexes, log);
        true
    }
}

/// A literal list that has been split but not yet converted to any type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsedLiteral {
    parts: Vec<String>,
    is_and: bool,
    source: String,
}

impl UnparsedLiteral {
    pub(crate) fn new(parts: Vec<String>, is_and: bool, source: impl Into<String>) -> Self {
        Self {
            parts,
            is_and,
            source: source.into(),
        }
    }

    /// The trimmed list parts in source order.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// `true` for an and-list, `false` for an or-list.
    #[must_use]
    pub fn is_and(&self) -> bool {
        self.is_and
    }

    /// The raw text the list was split from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Convert every part through `target`'s literal parser.
    ///
    /// Returns `None` when `target` has no parser or any part is rejected.
    #[must_use]
    pub fn convert_to(&self, target: &TypeDef) -> Option<SimpleLiteral> {
        let values = self
            .parts
            .iter()
            .map(|part| target.parse_literal(part))
            .collect::<Option<Vec<_>>>()?;
        Some(SimpleLiteral {
            type_name: target.name().to_string(),
            texts: self.parts.clone(),
            values,
            is_and: self.is_and,
        })
    }
}

impl Expr for UnparsedLiteral {
    fn is_single(&self) -> bool {
        self.parts.len() <= 1
    }

    fn convert(&self, target: &TypeDef) -> Option<Box<dyn Expr>> {
        if target.is_universal() {
            Some(Box::new(self.clone()))
        } else {
            self.convert_to(target)
                .map(|lit| Box::new(lit) as Box<dyn Expr>)
        }
    }

    fn describe(&self) -> String {
        self.source.clone()
    }
}

/// A literal list converted to one concrete type.
pub struct SimpleLiteral {
    type_name: String,
    texts: Vec<String>,
    values: Vec<Box<dyn Any>>,
    is_and: bool,
}

impl SimpleLiteral {
    /// Singular name of the type the values were parsed as.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The parsed host values, one per part.
    #[must_use]
    pub fn values(&self) -> &[Box<dyn Any>] {
        &self.values
    }

    /// `true` for an and-list, `false` for an or-list.
    #[must_use]
    pub fn is_and(&self) -> bool {
        self.is_and
    }
}

impl fmt::Debug for SimpleLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleLiteral")
            .field("type_name", &self.type_name)
            .field("texts", &self.texts)
            .field("is_and", &self.is_and)
            .finish_non_exhaustive()
    }
}

impl Expr for SimpleLiteral {
    fn is_single(&self) -> bool {
        self.values.len() <= 1
    }

    fn describe(&self) -> String {
        let glue = if self.is_and { " and " } else { " or " };
        self.texts.join(glue)
    }
}
