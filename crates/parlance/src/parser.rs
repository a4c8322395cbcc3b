//! The candidate driver and the public parse entry points.
//!
//! One [`Parser`] context exists per top-level parse request. Nested parses
//! (placeholder spans resolved as variables) run on the same context with
//! the best-error slot saved and restored, promoting strictly stronger
//! inner diagnostics outward.

use std::mem;

use parlance_patterns::PatternError;

use crate::diagnostics::ParseLog;
use crate::expr::{EventData, Expr, Slot};
use crate::list;
use crate::matcher::{Matcher, MatchResult, SlotSpec, scan_placeholders};
use crate::ranking::{BestError, ErrorQuality};
use crate::registry::{EventDef, ExprDef, Registry, TypeDef};
use crate::types::ParseError;
use crate::util::a_an;

/// Outcome of resolving one placeholder span.
pub(crate) enum Resolution {
    /// The span resolved to an expression of the requested type.
    Expr(Box<dyn Expr>),
    /// The span did not resolve; the message is the candidate
    /// not-a-variable diagnostic.
    Failed(String),
}

/// Per-request parse context.
pub(crate) struct Parser<'r, 'l> {
    registry: &'r Registry,
    pub(crate) log: &'l mut ParseLog,
    parse_static: bool,
    best: BestError,
}

impl<'r, 'l> Parser<'r, 'l> {
    fn new(registry: &'r Registry, log: &'l mut ParseLog, parse_static: bool) -> Self {
        Self {
            registry,
            log,
            parse_static,
            best: BestError::default(),
        }
    }

    pub(crate) fn best_quality(&self) -> ErrorQuality {
        self.best.quality
    }

    pub(crate) fn record_semantic(&mut self, message: String) {
        self.best.submit(ErrorQuality::Semantic, message);
    }

    pub(crate) fn record_not_a_variable(&mut self, message: String) {
        self.best.submit(ErrorQuality::NotAVariable, message);
    }

    /// Try every pattern of every candidate in order; first success wins.
    /// A semantic best error aborts the search.
    fn drive(
        &mut self,
        input: &str,
        candidates: &[ExprDef],
    ) -> Result<Option<Box<dyn Expr>>, ParseError> {
        for def in candidates {
            for (index, pattern) in def.patterns().iter().enumerate() {
                self.log.start_sub();
                match self.try_pattern(input, def, index, pattern) {
                    Ok(Some(expr)) => {
                        self.log.print_log();
                        return Ok(Some(expr));
                    }
                    Ok(None) => {
                        self.log.stop_sub();
                        if self.best.quality == ErrorQuality::Semantic {
                            return Ok(None);
                        }
                    }
                    Err(err) => {
                        self.log.stop_sub();
                        return Err(err);
                    }
                }
            }
        }
        Ok(None)
    }

    fn try_pattern(
        &mut self,
        input: &str,
        def: &ExprDef,
        index: usize,
        pattern: &str,
    ) -> Result<Option<Box<dyn Expr>>, ParseError> {
        let Some((bindings, result)) = self.try_match(input, pattern)? else {
            return Ok(None);
        };
        let mut expr = def.build();
        if expr.init(bindings, index, result.regexes(), self.log) {
            return Ok(Some(expr));
        }
        self.reject_init();
        Ok(None)
    }

    /// Run the matcher and substitute defaults for unbound slots.
    /// `Ok(None)` is a plain mismatch or a silent reject.
    fn try_match(
        &mut self,
        input: &str,
        pattern: &str,
    ) -> Result<Option<(Vec<Slot>, MatchResult)>, ParseError> {
        let slots = scan_placeholders(pattern, self.registry)?;
        let matched = Matcher::new(pattern, input, &slots, self).run()?;
        let Some(mut result) = matched else {
            return Ok(None);
        };
        let mut bindings = mem::take(&mut result.bindings);
        if !self.fill_defaults(pattern, &slots, &mut bindings)? {
            return Ok(None);
        }
        Ok(Some((bindings, result)))
    }

    /// Substitute the registered default for every unbound slot.
    ///
    /// A missing default is fatal unless the slot is optional; a default
    /// that contradicts the slot's plurality or tense is always fatal. A
    /// default whose `init_default` declines rejects the pattern silently
    /// (`Ok(false)`).
    fn fill_defaults(
        &mut self,
        pattern: &str,
        slots: &[SlotSpec<'_>],
        bindings: &mut [Slot],
    ) -> Result<bool, ParseError> {
        for slot in slots {
            let Some(binding) = bindings.get_mut(slot.index) else {
                continue;
            };
            if binding.is_some() {
                continue;
            }
            let Some(factory) = slot.ty.default_factory() else {
                if slot.optional {
                    continue;
                }
                return Err(ParseError::MissingDefault {
                    type_name: slot.vi.type_name.clone(),
                    pattern: pattern.to_string(),
                });
            };
            let mut value = factory();
            if !slot.vi.is_plural && !value.is_single() {
                return Err(ParseError::IncompatibleDefault {
                    type_name: slot.vi.type_name.clone(),
                    pattern: pattern.to_string(),
                    reason: "the default expression is plural but the slot is singular".into(),
                });
            }
            if slot.vi.time != 0 && !value.set_time(slot.vi.time) {
                return Err(ParseError::IncompatibleDefault {
                    type_name: slot.vi.type_name.clone(),
                    pattern: pattern.to_string(),
                    reason: "the default expression has no past or future state".into(),
                });
            }
            if !value.init_default() {
                return Ok(false);
            }
            *binding = Some(value);
        }
        Ok(true)
    }

    fn reject_init(&mut self) {
        if let Some(message) = self.log.last_error() {
            let message = message.to_string();
            self.best.submit(ErrorQuality::Semantic, message);
        }
    }

    /// Resolve one placeholder span as an expression of type `ty`.
    ///
    /// Tries the variables registry first (unless parsing statically), then
    /// falls back to a literal list.
    pub(crate) fn resolve_var(
        &mut self,
        ty: &TypeDef,
        span: &str,
    ) -> Result<Resolution, ParseError> {
        let span = span.trim();
        let mut inner_error = None;
        if !self.parse_static {
            let registry = self.registry;
            self.log.start_sub();
            let saved = mem::take(&mut self.best);
            let outcome = self.drive(span, registry.variables());
            let inner = mem::replace(&mut self.best, saved);
            match outcome {
                Err(err) => {
                    self.log.stop_sub();
                    return Err(err);
                }
                Ok(Some(value)) => {
                    self.log.print_log();
                    self.best.promote(inner);
                    return Ok(match value.convert(ty) {
                        Some(converted) => Resolution::Expr(converted),
                        None => {
                            let be = if value.is_single() { "is" } else { "are" };
                            let message =
                                format!("{} {be} not {}", value.describe(), a_an(ty.name()));
                            self.best.submit(ErrorQuality::WrongType, message.clone());
                            Resolution::Failed(message)
                        }
                    });
                }
                Ok(None) => {
                    inner_error = self.log.last_error().map(ToString::to_string);
                    self.log.stop_sub();
                    self.best.promote(inner);
                    if self.best.quality == ErrorQuality::Semantic {
                        let message = inner_error
                            .unwrap_or_else(|| format!("'{span}' is not {}", a_an(ty.name())));
                        return Ok(Resolution::Failed(message));
                    }
                }
            }
        }

        self.log.start_sub();
        let literal = list::parse_literal_list(span, self.log);
        if ty.is_universal() {
            self.log.print_log();
            return Ok(Resolution::Expr(Box::new(literal)));
        }
        match literal.convert_to(ty) {
            Some(typed) => {
                self.log.print_log();
                Ok(Resolution::Expr(Box::new(typed)))
            }
            None => {
                self.log.stop_sub();
                let message =
                    inner_error.unwrap_or_else(|| format!("'{span}' is not {}", a_an(ty.name())));
                Ok(Resolution::Failed(message))
            }
        }
    }

    /// Surface the best recorded error, or `default` when none exists.
    fn surface(&mut self, default: Option<&str>) {
        if let Some(message) = self.best.message.clone() {
            self.log.error(message);
        } else if let Some(default) = default {
            self.log.error(default);
        }
    }
}

/// Parse `input` against the given candidate expression definitions.
///
/// Candidates are tried in slice order and each definition's patterns in
/// declared order; the first successfully constructed expression wins. With
/// `allow_literal_fallback`, an input no candidate matches becomes an
/// [`UnparsedLiteral`](crate::UnparsedLiteral) instead of an error. When
/// the search fails outright, the best-ranked diagnostic (or
/// `default_error`) is written to `log`.
///
/// # Errors
/// Returns [`ParseError`] for malformed patterns and API misuse (unknown
/// types, missing or incompatible defaults); user input errors are reported
/// through `log` and yield `Ok(None)`.
pub fn parse_expression(
    registry: &Registry,
    log: &mut ParseLog,
    input: &str,
    candidates: &[ExprDef],
    allow_literal_fallback: bool,
    default_error: Option<&str>,
) -> Result<Option<Box<dyn Expr>>, ParseError> {
    if input.is_empty() {
        return Err(PatternError::EmptyInput.into());
    }
    let mut parser = Parser::new(registry, log, false);
    if let Some(expr) = parser.drive(input, candidates)? {
        return Ok(Some(expr));
    }
    if parser.best.quality < ErrorQuality::Semantic && allow_literal_fallback {
        let literal = list::parse_literal_list(input.trim(), parser.log);
        return Ok(Some(Box::new(literal)));
    }
    parser.surface(default_error);
    Ok(None)
}

/// Parse `input` as a literal list of the named type.
///
/// The universal type returns the split list unconverted; any other type
/// converts every part through its literal parser.
///
/// # Errors
/// Returns [`ParseError::UnknownType`] when `type_name` is not registered
/// and [`PatternError::EmptyInput`] for empty input.
pub fn parse_literal(
    registry: &Registry,
    log: &mut ParseLog,
    input: &str,
    type_name: &str,
) -> Result<Option<Box<dyn Expr>>, ParseError> {
    if input.is_empty() {
        return Err(PatternError::EmptyInput.into());
    }
    let ty = registry
        .type_named(type_name)
        .ok_or_else(|| ParseError::UnknownType {
            type_name: type_name.to_string(),
            referrer: input.to_string(),
        })?;
    log.start_sub();
    let literal = list::parse_literal_list(input.trim(), log);
    if ty.is_universal() {
        log.print_log();
        return Ok(Some(Box::new(literal)));
    }
    match literal.convert_to(ty) {
        Some(typed) => {
            log.print_log();
            Ok(Some(Box::new(typed)))
        }
        None => {
            log.stop_sub();
            log.error(format!("'{}' is not {}", input.trim(), a_an(ty.name())));
            Ok(None)
        }
    }
}

/// Parse `input` as an event header against the registered event
/// definitions.
///
/// Nested variable parsing is disabled, so every placeholder resolves to a
/// literal. The winning definition is returned together with its
/// constructed instance.
///
/// # Errors
/// As [`parse_expression`]: author and API errors are returned, user input
/// errors are logged and yield `Ok(None)`.
pub fn parse_event<'r>(
    registry: &'r Registry,
    log: &mut ParseLog,
    input: &str,
    default_error: Option<&str>,
) -> Result<Option<(&'r EventDef, Box<dyn EventData>)>, ParseError> {
    if input.is_empty() {
        return Err(PatternError::EmptyInput.into());
    }
    let mut parser = Parser::new(registry, log, true);
    for def in registry.events() {
        for (index, pattern) in def.patterns().iter().enumerate() {
            parser.log.start_sub();
            match parser.try_event_pattern(input, def, index, pattern) {
                Ok(Some(event)) => {
                    parser.log.print_log();
                    return Ok(Some((def, event)));
                }
                Ok(None) => {
                    parser.log.stop_sub();
                    if parser.best.quality == ErrorQuality::Semantic {
                        parser.surface(default_error);
                        return Ok(None);
                    }
                }
                Err(err) => {
                    parser.log.stop_sub();
                    return Err(err);
                }
            }
        }
    }
    parser.surface(default_error);
    Ok(None)
}

impl Parser<'_, '_> {
    fn try_event_pattern(
        &mut self,
        input: &str,
        def: &EventDef,
        index: usize,
        pattern: &str,
    ) -> Result<Option<Box<dyn EventData>>, ParseError> {
        let Some((bindings, result)) = self.try_match(input, pattern)? else {
            return Ok(None);
        };
        let mut event = def.build();
        if event.init(bindings, index, result.regexes(), self.log) {
            return Ok(Some(event));
        }
        self.reject_init();
        Ok(None)
    }
}
