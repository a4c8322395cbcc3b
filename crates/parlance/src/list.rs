//! Literal list splitting.
//!
//! A leaf span such as `a, b and c` becomes an ordered part list with a
//! conjunction flag. Splitting never crosses a quoted region, so quoted
//! commas and conjunctions survive intact.

use std::sync::LazyLock;

use parlance_patterns::next_unescaped_quote;
use regex::Regex;

use crate::diagnostics::ParseLog;
use crate::expr::UnparsedLiteral;

/// Left-anchored scanner: a quote-aware wildcard followed by one separator.
/// The `and`/`or` alternatives come before the bare comma so that `, and`
/// reads as a conjunction rather than a comma with an `and b` tail.
static LIST_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "the splitter source is a fixed valid regex")]
    Regex::new(r#"^([^"]*?(?:"[^"]*?"[^"]*?)*?)(,?\s+and\s+|,?\s+n?or\s+|,\s*)"#)
        .expect("list splitter compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    Comma,
    And,
    Or,
}

fn classify(separator: &str) -> Separator {
    if separator.contains("and") {
        Separator::And
    } else if separator.contains("or") {
        Separator::Or
    } else {
        Separator::Comma
    }
}

/// Trim a part and unquote it when it is a single quoted region.
fn clean_part(part: &str) -> String {
    let part = part.trim();
    if part.len() >= 2
        && part.starts_with('"')
        && next_unescaped_quote(part, 1) == Some(part.len() - 1)
    {
        let inner = part.get(1..part.len() - 1).unwrap_or_default();
        inner.replace("\"\"", "\"")
    } else {
        part.to_string()
    }
}

/// Split `text` into an [`UnparsedLiteral`], recording warnings for
/// ambiguous conjunctions in the current log scope.
pub(crate) fn parse_literal_list(text: &str, log: &mut ParseLog) -> UnparsedLiteral {
    let mut parts = Vec::new();
    let mut conjunction: Option<bool> = None;
    let mut mixed = false;
    let mut rest = text;
    while let Some(caps) = LIST_SPLIT.captures(rest) {
        let Some(whole) = caps.get(0) else { break };
        parts.push(clean_part(caps.get(1).map_or("", |m| m.as_str())));
        match classify(caps.get(2).map_or("", |m| m.as_str())) {
            Separator::Comma => {}
            Separator::And => match conjunction {
                None => conjunction = Some(true),
                Some(true) => {}
                Some(false) => mixed = true,
            },
            Separator::Or => match conjunction {
                None => conjunction = Some(false),
                Some(false) => {}
                Some(true) => mixed = true,
            },
        }
        rest = rest.get(whole.end()..).unwrap_or_default();
    }
    parts.push(clean_part(rest));

    let is_and = if parts.len() <= 1 {
        true
    } else if mixed {
        log.warning("list has multiple 'and' or 'or', will default to 'and'");
        true
    } else {
        conjunction.unwrap_or_else(|| {
            log.warning("list is missing 'and' or 'or', will default to 'and'");
            true
        })
    };
    UnparsedLiteral::new(parts, is_and, text)
}
