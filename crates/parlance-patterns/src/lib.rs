//! Pattern-syntax scanning primitives shared by the parlance runtime.
//!
//! The crate is the single source of truth for the pattern DSL's surface
//! syntax: bracket balancing, alternation splitting, escape handling,
//! quote-aware input scanning, and placeholder-body parsing. The runtime
//! crate layers the backtracking match engine on top of these helpers.

mod error;
mod placeholder;
mod scan;

pub use error::PatternError;
pub use placeholder::{PlaceholderSpec, parse_placeholder};
pub use scan::{
    end_of_group, next_matching, next_unescaped, next_unescaped_quote, split_alternation,
};
