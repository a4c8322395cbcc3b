//! The backtracking match engine.
//!
//! A pattern is walked directly over the input with two cursors. Simple
//! tokens (literals, spaces, escapes, group terminators) advance in a loop;
//! optional groups, alternations, placeholders, and regex slots branch by
//! recursion. Placeholder spans are searched by expanding the right
//! boundary, never splitting a quoted input region, and each candidate span
//! is only resolved once the rest of the pattern is known to match the rest
//! of the input.

use std::collections::HashMap;

use parlance_patterns::{
    PatternError, end_of_group, next_matching, next_unescaped, next_unescaped_quote,
    parse_placeholder, split_alternation,
};
use regex::Regex;

use crate::expr::Slot;
use crate::parser::{Parser, Resolution};
use crate::ranking::ErrorQuality;
use crate::registry::{Registry, TypeDef};
use crate::types::{ParseError, VarInfo};
use crate::util::english_plural;

/// Literal characters a tentative match must have consumed before a failed
/// placeholder resolution is worth reporting.
const NOT_A_VARIABLE_THRESHOLD: usize = 5;

/// Owned capture groups of one `<…>` regex slot.
///
/// Group `0` is the whole slot match; further groups follow the slot's own
/// capture groups. Groups that did not participate are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexMatch {
    groups: Vec<Option<String>>,
}

impl RegexMatch {
    fn from_captures(caps: &regex::Captures<'_>) -> Self {
        Self {
            groups: caps
                .iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect(),
        }
    }

    /// Text of capture group `index`, if it participated.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(Option::as_deref)
    }

    /// Number of groups, counting the whole match as group `0`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no groups were captured at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// A successful walk of one pattern over the whole input.
#[derive(Debug)]
pub struct MatchResult {
    pub(crate) bindings: Vec<Slot>,
    pub(crate) regexes: Vec<RegexMatch>,
    pub(crate) matched_chars: usize,
}

impl MatchResult {
    fn new(slot_count: usize, matched_chars: usize) -> Self {
        Self {
            bindings: std::iter::repeat_with(|| None).take(slot_count).collect(),
            regexes: Vec::new(),
            matched_chars,
        }
    }

    /// Regex-slot matches in source-pattern order.
    #[must_use]
    pub fn regexes(&self) -> &[RegexMatch] {
        &self.regexes
    }

    /// Literal characters consumed across the whole match.
    #[must_use]
    pub fn matched_chars(&self) -> usize {
        self.matched_chars
    }
}

/// One pre-scanned placeholder slot of a pattern.
#[derive(Debug)]
pub(crate) struct SlotSpec<'r> {
    pub(crate) index: usize,
    pub(crate) pos: usize,
    pub(crate) end: usize,
    pub(crate) optional: bool,
    pub(crate) vi: VarInfo,
    pub(crate) ty: &'r TypeDef,
}

/// Collect every `%…%` slot of `pattern` in source order, resolving each
/// name through the pluralizer and the type registry. Regex slots are
/// opaque to the scan.
pub(crate) fn scan_placeholders<'r>(
    pattern: &str,
    registry: &'r Registry,
) -> Result<Vec<SlotSpec<'r>>, ParseError> {
    let bytes = pattern.as_bytes();
    let mut slots = Vec::new();
    let mut j = 0;
    while let Some(&b) = bytes.get(j) {
        match b {
            b'\\' => {
                if bytes.get(j + 1).is_none() {
                    return Err(PatternError::DanglingEscape(pattern.to_string()).into());
                }
                j += 2;
            }
            b'<' => {
                let close = (j + 1..bytes.len())
                    .find(|&k| bytes.get(k) == Some(&b'>'))
                    .ok_or_else(|| PatternError::UnclosedRegex {
                        position: j,
                        pattern: pattern.to_string(),
                    })?;
                j = close + 1;
            }
            b'%' => {
                let end = next_unescaped(pattern, b'%', j + 1)
                    .ok_or_else(|| PatternError::UnclosedPlaceholder(pattern.to_string()))?;
                let spec = parse_placeholder(pattern, j, end)?;
                let (base, is_plural) = english_plural(&spec.name);
                let ty = registry
                    .type_named(&base)
                    .ok_or_else(|| ParseError::UnknownType {
                        type_name: base.clone(),
                        referrer: pattern.to_string(),
                    })?;
                slots.push(SlotSpec {
                    index: slots.len(),
                    pos: j,
                    end,
                    optional: spec.optional,
                    vi: VarInfo {
                        type_name: base,
                        is_plural,
                        time: spec.time,
                    },
                    ty,
                });
                j = end + 1;
            }
            _ => j += 1,
        }
    }
    Ok(slots)
}

/// One pattern walk over one input, borrowing the parse context for nested
/// placeholder resolution.
pub(crate) struct Matcher<'a, 'r, 'l> {
    pattern: &'a str,
    input: &'a str,
    slots: &'a [SlotSpec<'r>],
    parser: &'a mut Parser<'r, 'l>,
    regex_cache: HashMap<usize, Regex>,
}

impl<'a, 'r, 'l> Matcher<'a, 'r, 'l> {
    pub(crate) fn new(
        pattern: &'a str,
        input: &'a str,
        slots: &'a [SlotSpec<'r>],
        parser: &'a mut Parser<'r, 'l>,
    ) -> Self {
        Self {
            pattern,
            input,
            slots,
            parser,
            regex_cache: HashMap::new(),
        }
    }

    pub(crate) fn run(&mut self) -> Result<Option<MatchResult>, ParseError> {
        self.match_at(0, 0, 0)
    }

    /// Match pattern suffix `j..` against input suffix `i..`, with `matched`
    /// literal characters already consumed by enclosing frames.
    fn match_at(
        &mut self,
        mut i: usize,
        mut j: usize,
        mut matched: usize,
    ) -> Result<Option<MatchResult>, ParseError> {
        let pattern = self.pattern;
        let p = pattern.as_bytes();
        let e = self.input.as_bytes();
        loop {
            let Some(&pc) = p.get(j) else {
                // Success requires both cursors exhausted together.
                return Ok((i == e.len()).then(|| MatchResult::new(self.slots.len(), matched)));
            };
            match pc {
                b'[' => {
                    if let Some(res) = self.match_at(i, j + 1, matched)? {
                        return Ok(Some(res));
                    }
                    let close = next_matching(pattern, b'[', b']', j)?;
                    let preceded =
                        j == 0 || matches!(p.get(j - 1), Some(b' ' | b'(' | b'['));
                    j = close + 1;
                    // Absorb the padding space of an absent group.
                    if preceded && p.get(j) == Some(&b' ') {
                        j += 1;
                    }
                }
                b'(' => {
                    let close = next_matching(pattern, b'(', b')', j)?;
                    for (start, _) in split_alternation(pattern, j, close)? {
                        if let Some(res) = self.match_at(i, start, matched)? {
                            return Ok(Some(res));
                        }
                    }
                    return Ok(None);
                }
                b'%' => return self.match_placeholder(i, j, matched),
                b'<' => return self.match_regex_slot(i, j, matched),
                // A matched group body runs off its closing bracket.
                b')' | b']' => j += 1,
                b'|' => j = end_of_group(pattern, j)? + 1,
                b' ' => {
                    if i == e.len() || (i > 0 && e.get(i - 1) == Some(&b' ')) {
                        j += 1;
                    } else if e.get(i) == Some(&b' ') {
                        i += 1;
                        j += 1;
                        matched += 1;
                    } else {
                        return Ok(None);
                    }
                }
                b'\\' => {
                    let Some(&escaped) = p.get(j + 1) else {
                        return Err(PatternError::DanglingEscape(pattern.to_string()).into());
                    };
                    match e.get(i) {
                        Some(&ec) if ec.eq_ignore_ascii_case(&escaped) => {
                            i += 1;
                            j += 2;
                            matched += 1;
                        }
                        _ => return Ok(None),
                    }
                }
                literal => match e.get(i) {
                    Some(&ec) if ec.eq_ignore_ascii_case(&literal) => {
                        i += 1;
                        j += 1;
                        matched += 1;
                    }
                    _ => return Ok(None),
                },
            }
        }
    }

    /// Search the right boundary of the placeholder at `j`, resolving each
    /// candidate span once the rest of the pattern matches the rest of the
    /// input.
    fn match_placeholder(
        &mut self,
        i: usize,
        j: usize,
        matched: usize,
    ) -> Result<Option<MatchResult>, ParseError> {
        let slots = self.slots;
        let slot = slots.iter().find(|slot| slot.pos == j).ok_or_else(|| {
            ParseError::from(PatternError::UnclosedPlaceholder(self.pattern.to_string()))
        })?;
        let input = self.input;
        let e = input.as_bytes();
        let len = input.len();

        let mut i2 = if slot.end == self.pattern.len() - 1 {
            // Final placeholder: greedily take the whole remainder.
            len
        } else if e.get(i) == Some(&b'"') {
            match next_unescaped_quote(input, i + 1) {
                Some(close) => close + 1,
                None => return Ok(None),
            }
        } else {
            i + 1
        };

        while i2 <= len {
            if !input.is_char_boundary(i2) {
                i2 += 1;
                continue;
            }
            if i2 < len && e.get(i2) == Some(&b'"') {
                // A span boundary may not split a quoted region.
                match next_unescaped_quote(input, i2 + 1) {
                    Some(close) => i2 = close + 1,
                    None => return Ok(None),
                }
            }
            if let Some(mut res) = self.match_at(i2, slot.end + 1, matched)? {
                let span = input.get(i..i2).unwrap_or_default();
                match self.parser.resolve_var(slot.ty, span)? {
                    Resolution::Expr(mut value) => {
                        if !slot.vi.is_plural && !value.is_single() {
                            self.parser.record_semantic(format!(
                                "this expression can only accept a single {}, but multiple are given.",
                                slot.ty.name()
                            ));
                            return Ok(None);
                        }
                        if slot.vi.time != 0 && !value.set_time(slot.vi.time) {
                            let state = if slot.vi.time < 0 { "past" } else { "future" };
                            self.parser.record_semantic(format!(
                                "{} does not have a {state} state",
                                value.describe()
                            ));
                            return Ok(None);
                        }
                        if let Some(binding) = res.bindings.get_mut(slot.index) {
                            *binding = Some(value);
                        }
                        return Ok(Some(res));
                    }
                    Resolution::Failed(message) => {
                        if self.parser.best_quality() == ErrorQuality::Semantic {
                            return Ok(None);
                        }
                        if res.matched_chars >= NOT_A_VARIABLE_THRESHOLD {
                            self.parser.record_not_a_variable(message);
                        }
                    }
                }
            }
            i2 += 1;
        }
        Ok(None)
    }

    /// Match the `<…>` slot at `j`: pick a span whose remainder matches,
    /// then require the compiled slot regex to cover the span completely.
    fn match_regex_slot(
        &mut self,
        i: usize,
        j: usize,
        matched: usize,
    ) -> Result<Option<MatchResult>, ParseError> {
        let pattern = self.pattern;
        let p = pattern.as_bytes();
        let close = (j + 1..p.len())
            .find(|&k| p.get(k) == Some(&b'>'))
            .ok_or_else(|| PatternError::UnclosedRegex {
                position: j,
                pattern: pattern.to_string(),
            })?;
        let re = match self.regex_cache.get(&j) {
            Some(re) => re.clone(),
            None => {
                let source = pattern.get(j + 1..close).unwrap_or_default();
                let re =
                    Regex::new(&format!("^(?:{source})$")).map_err(PatternError::from)?;
                self.regex_cache.insert(j, re.clone());
                re
            }
        };

        let input = self.input;
        let len = input.len();
        let mut i2 = i + 1;
        while i2 <= len {
            if !input.is_char_boundary(i2) {
                i2 += 1;
                continue;
            }
            if let Some(mut res) = self.match_at(i2, close + 1, matched)? {
                let span = input.get(i..i2).unwrap_or_default();
                if let Some(caps) = re.captures(span) {
                    res.regexes.insert(0, RegexMatch::from_captures(&caps));
                    return Ok(Some(res));
                }
            }
            i2 += 1;
        }
        Ok(None)
    }
}
