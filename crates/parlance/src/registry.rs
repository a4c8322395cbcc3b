//! Definition registries consumed by the parser.
//!
//! The host populates one [`Registry`] with type, expression, variable, and
//! event definitions; the parser treats it as immutable for the duration of
//! a call. Factories are plain function pointers so definitions stay
//! `'static` records, registered eagerly.

use std::any::Any;
use std::collections::HashMap;

use crate::expr::{EventData, Expr};

/// Name of the universal type pre-registered in every registry.
pub const UNIVERSAL_TYPE: &str = "object";

/// Parses one literal part into a host value.
pub type LiteralParser = fn(&str) -> Option<Box<dyn Any>>;

/// Produces a fresh expression instance.
pub type ExprFactory = fn() -> Box<dyn Expr>;

/// Produces a fresh event instance.
pub type EventFactory = fn() -> Box<dyn EventData>;

/// A registered literal type.
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: String,
    universal: bool,
    parse: Option<LiteralParser>,
    default: Option<ExprFactory>,
}

impl TypeDef {
    /// Create a type with the given singular display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            universal: false,
            parse: None,
            default: None,
        }
    }

    /// Create the universal type, which accepts any literal as-is.
    #[must_use]
    pub fn universal(name: impl Into<String>) -> Self {
        Self {
            universal: true,
            ..Self::new(name)
        }
    }

    /// Attach a literal parser.
    #[must_use]
    pub fn with_parser(mut self, parse: LiteralParser) -> Self {
        self.parse = Some(parse);
        self
    }

    /// Attach a default-expression factory for unbound slots.
    #[must_use]
    pub fn with_default(mut self, default: ExprFactory) -> Self {
        self.default = Some(default);
        self
    }

    /// The singular display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the universal type.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.universal
    }

    pub(crate) fn parse_literal(&self, text: &str) -> Option<Box<dyn Any>> {
        self.parse.and_then(|parse| parse(text))
    }

    pub(crate) fn default_factory(&self) -> Option<ExprFactory> {
        self.default
    }
}

/// A registered expression (or variable) definition.
#[derive(Debug, Clone)]
pub struct ExprDef {
    name: String,
    patterns: Vec<String>,
    factory: ExprFactory,
}

impl ExprDef {
    /// Create a definition from its patterns, tried in declared order.
    #[must_use]
    pub fn new(name: impl Into<String>, patterns: &[&str], factory: ExprFactory) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(ToString::to_string).collect(),
            factory,
        }
    }

    /// Identifier used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared patterns in trial order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub(crate) fn build(&self) -> Box<dyn Expr> {
        (self.factory)()
    }
}

/// A registered event definition.
#[derive(Debug, Clone)]
pub struct EventDef {
    name: String,
    patterns: Vec<String>,
    factory: EventFactory,
}

impl EventDef {
    /// Create a definition from its header patterns, tried in declared
    /// order.
    #[must_use]
    pub fn new(name: impl Into<String>, patterns: &[&str], factory: EventFactory) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(ToString::to_string).collect(),
            factory,
        }
    }

    /// Identifier used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared header patterns in trial order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub(crate) fn build(&self) -> Box<dyn EventData> {
        (self.factory)()
    }
}

/// All definitions visible to one parse call.
#[derive(Debug)]
pub struct Registry {
    types: HashMap<String, TypeDef>,
    expressions: Vec<ExprDef>,
    variables: Vec<ExprDef>,
    events: Vec<EventDef>,
}

impl Registry {
    /// Create a registry holding only the universal type.
    #[must_use]
    pub fn new() -> Self {
        let mut types = HashMap::new();
        types.insert(UNIVERSAL_TYPE.to_string(), TypeDef::universal(UNIVERSAL_TYPE));
        Self {
            types,
            expressions: Vec::new(),
            variables: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Register a type, replacing any previous type of the same name.
    pub fn register_type(&mut self, ty: TypeDef) {
        self.types.insert(ty.name.clone(), ty);
    }

    /// Register an expression definition; candidates are tried in
    /// registration order.
    pub fn register_expression(&mut self, def: ExprDef) {
        self.expressions.push(def);
    }

    /// Register a variable definition, used when resolving placeholder
    /// spans as nested expressions.
    pub fn register_variable(&mut self, def: ExprDef) {
        self.variables.push(def);
    }

    /// Register an event definition.
    pub fn register_event(&mut self, def: EventDef) {
        self.events.push(def);
    }

    /// Look up a type by its singular name.
    #[must_use]
    pub fn type_named(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// The registered expression definitions in registration order.
    #[must_use]
    pub fn expressions(&self) -> &[ExprDef] {
        &self.expressions
    }

    /// The registered variable definitions in registration order.
    #[must_use]
    pub fn variables(&self) -> &[ExprDef] {
        &self.variables
    }

    /// The registered event definitions in registration order.
    #[must_use]
    pub fn events(&self) -> &[EventDef] {
        &self.events
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
