//! Pattern-directed expression parser for an embeddable scripting
//! language.
//!
//! Script authors write near-English phrases such as `the world of %world%`
//! or `give %itemtype% to %player%`; extension authors register expression
//! definitions, each advertising one or more patterns plus a factory for a
//! runtime expression object. Given an input phrase and an ordered sequence
//! of candidate definitions, the parser decides which definition matches,
//! binds every typed placeholder to a recursively parsed sub-expression of
//! the right type, and reports the single most informative diagnostic when
//! nothing matches.
//!
//! Pattern syntax: literal text matches case-insensitively, `[…]` is an
//! optional group, `(a|b)` an alternation tried left to right, `%name%` a
//! typed placeholder (`-` marks it optional, `@-1`/`@1` request a past or
//! future view), `<…>` a raw regex slot, and `\` escapes the next
//! character. Quoted input regions (with `""` as an embedded quote) are
//! atomic: a placeholder span never ends inside one.
//!
//! ```
//! use parlance::{Expr, ParseLog, Registry, parse_expression};
//!
//! let registry = Registry::new();
//! let mut log = ParseLog::new();
//! // No candidates match, so the input falls back to an unparsed literal.
//! let expr = parse_expression(&registry, &mut log, "red and blue", &[], true, None)
//!     .expect("no patterns involved, so no author errors")
//!     .expect("literal fallback always produces a value");
//! assert_eq!(expr.describe(), "red and blue");
//! ```

mod diagnostics;
mod expr;
mod list;
mod matcher;
mod parser;
mod ranking;
mod registry;
mod types;
mod util;

pub use diagnostics::{LogEntry, ParseLog};
pub use expr::{EventData, Expr, SimpleLiteral, Slot, UnparsedLiteral};
pub use matcher::{MatchResult, RegexMatch};
pub use parlance_patterns::PatternError;
pub use parser::{parse_event, parse_expression, parse_literal};
pub use ranking::ErrorQuality;
pub use registry::{
    EventDef, EventFactory, ExprDef, ExprFactory, LiteralParser, Registry, TypeDef,
    UNIVERSAL_TYPE,
};
pub use types::{ParseError, VarInfo};
pub use util::{a_an, english_plural};
