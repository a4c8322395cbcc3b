//! End-to-end parsing behaviour over a small fixture registry.
#![expect(clippy::expect_used, reason = "tests panic on fixture misuse")]

use std::any::Any;

use parlance::{
    EventData, EventDef, Expr, ExprDef, ParseError, ParseLog, PatternError, Registry,
    RegexMatch, Slot, TypeDef, parse_event, parse_expression, parse_literal,
};
use rstest::{fixture, rstest};

// ---------------------------------------------------------------- types --

fn parse_player(text: &str) -> Option<Box<dyn Any>> {
    matches!(text, "alice" | "bob" | "charlie")
        .then(|| Box::new(text.to_string()) as Box<dyn Any>)
}

fn parse_world(text: &str) -> Option<Box<dyn Any>> {
    let name = text.strip_prefix("world ").unwrap_or(text);
    let name = name.strip_prefix('"').and_then(|n| n.strip_suffix('"')).unwrap_or(name);
    (!name.is_empty() && name.chars().all(|c| c.is_alphanumeric()))
        .then(|| Box::new(name.to_string()) as Box<dyn Any>)
}

fn parse_words(text: &str) -> Option<Box<dyn Any>> {
    (!text.is_empty() && text.chars().all(|c| c.is_alphabetic() || c == ' '))
        .then(|| Box::new(text.to_string()) as Box<dyn Any>)
}

fn parse_entity(text: &str) -> Option<Box<dyn Any>> {
    matches!(text, "pig" | "cow" | "zombie").then(|| Box::new(text.to_string()) as Box<dyn Any>)
}

fn parse_block(text: &str) -> Option<Box<dyn Any>> {
    matches!(text, "stone" | "dirt").then(|| Box::new(text.to_string()) as Box<dyn Any>)
}

fn parse_number(text: &str) -> Option<Box<dyn Any>> {
    text.parse::<i64>().ok().map(|n| Box::new(n) as Box<dyn Any>)
}

fn parse_string(text: &str) -> Option<Box<dyn Any>> {
    (!text.is_empty()).then(|| Box::new(text.to_string()) as Box<dyn Any>)
}

// ----------------------------------------------------- fixture registry --

#[derive(Debug)]
struct MainWorld;

impl Expr for MainWorld {
    fn is_single(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "the main world".into()
    }
}

fn main_world() -> Box<dyn Expr> {
    Box::new(MainWorld)
}

/// A `{name}` reference: dynamically typed, usable in any tense.
#[derive(Debug, Default, Clone)]
struct CurlyVar {
    name: String,
}

impl Expr for CurlyVar {
    fn init(
        &mut self,
        _args: Vec<Slot>,
        _pattern_index: usize,
        regexes: &[RegexMatch],
        _log: &mut ParseLog,
    ) -> bool {
        self.name = regexes
            .first()
            .and_then(|m| m.group(0))
            .unwrap_or_default()
            .to_string();
        true
    }

    fn is_single(&self) -> bool {
        true
    }

    fn set_time(&mut self, _time: i32) -> bool {
        true
    }

    fn convert(&self, _target: &TypeDef) -> Option<Box<dyn Expr>> {
        Some(Box::new(self.clone()))
    }

    fn describe(&self) -> String {
        format!("{{{}}}", self.name)
    }
}

fn curly_var() -> Box<dyn Expr> {
    Box::new(CurlyVar::default())
}

/// `the number <n>`: a variable convertible to numbers only.
#[derive(Debug, Default, Clone)]
struct NumberVar {
    text: String,
}

impl Expr for NumberVar {
    fn init(
        &mut self,
        _args: Vec<Slot>,
        _pattern_index: usize,
        regexes: &[RegexMatch],
        _log: &mut ParseLog,
    ) -> bool {
        self.text = regexes
            .first()
            .and_then(|m| m.group(0))
            .unwrap_or_default()
            .to_string();
        true
    }

    fn is_single(&self) -> bool {
        true
    }

    fn convert(&self, target: &TypeDef) -> Option<Box<dyn Expr>> {
        (target.name() == "number" || target.is_universal())
            .then(|| Box::new(self.clone()) as Box<dyn Expr>)
    }

    fn describe(&self) -> String {
        format!("the number {}", self.text)
    }
}

fn number_var() -> Box<dyn Expr> {
    Box::new(NumberVar::default())
}

#[fixture]
fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register_type(TypeDef::new("player").with_parser(parse_player));
    registry.register_type(
        TypeDef::new("world")
            .with_parser(parse_world)
            .with_default(main_world),
    );
    registry.register_type(TypeDef::new("itemtype").with_parser(parse_words));
    registry.register_type(TypeDef::new("item").with_parser(parse_words));
    registry.register_type(TypeDef::new("entity type").with_parser(parse_entity));
    registry.register_type(TypeDef::new("block").with_parser(parse_block));
    registry.register_type(TypeDef::new("number").with_parser(parse_number));
    registry.register_type(TypeDef::new("string").with_parser(parse_string));
    registry.register_variable(ExprDef::new("curly variable", &[r"\{<[^{}]+>\}"], curly_var));
    registry.register_variable(ExprDef::new("number variable", &[r"the number <\d+>"], number_var));
    registry
}

// ------------------------------------------------------ test expressions --

macro_rules! describe_expr {
    ($name:ident, $fmt:literal, $slots:literal) => {
        #[derive(Debug, Default)]
        struct $name {
            parts: Vec<String>,
        }

        impl Expr for $name {
            fn init(
                &mut self,
                args: Vec<Slot>,
                _pattern_index: usize,
                _regexes: &[RegexMatch],
                _log: &mut ParseLog,
            ) -> bool {
                assert_eq!(args.len(), $slots);
                self.parts = args
                    .into_iter()
                    .map(|slot| slot.map_or_else(|| "<unbound>".to_string(), |e| e.describe()))
                    .collect();
                true
            }

            fn is_single(&self) -> bool {
                true
            }

            fn describe(&self) -> String {
                let mut out = $fmt.to_string();
                for part in &self.parts {
                    out = out.replacen("{}", part, 1);
                }
                out
            }
        }
    };
}

describe_expr!(WorldExpr, "the world of {}", 1);
describe_expr!(GiveExpr, "give {} to {}", 2);
describe_expr!(SayExpr, "say {} to {}", 2);
describe_expr!(KillExpr, "kill {}", 1);
describe_expr!(BreakExpr, "break {}", 1);
describe_expr!(GiftExpr, "{} gives {} to {}", 3);
describe_expr!(SpawnExpr, "spawn {}", 1);
describe_expr!(AltExpr, "alt {} {}", 2);

fn world_expr() -> Box<dyn Expr> {
    Box::new(WorldExpr::default())
}
fn give_expr() -> Box<dyn Expr> {
    Box::new(GiveExpr::default())
}
fn say_expr() -> Box<dyn Expr> {
    Box::new(SayExpr::default())
}
fn kill_expr() -> Box<dyn Expr> {
    Box::new(KillExpr::default())
}
fn break_expr() -> Box<dyn Expr> {
    Box::new(BreakExpr::default())
}
fn gift_expr() -> Box<dyn Expr> {
    Box::new(GiftExpr::default())
}
fn spawn_expr() -> Box<dyn Expr> {
    Box::new(SpawnExpr::default())
}
fn alt_expr() -> Box<dyn Expr> {
    Box::new(AltExpr::default())
}

#[derive(Debug)]
struct Tagged(&'static str);

impl Expr for Tagged {
    fn is_single(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        self.0.to_string()
    }
}

fn first_expr() -> Box<dyn Expr> {
    Box::new(Tagged("first"))
}
fn second_expr() -> Box<dyn Expr> {
    Box::new(Tagged("second"))
}
fn fallback_expr() -> Box<dyn Expr> {
    Box::new(Tagged("fallback"))
}

#[derive(Debug)]
struct SilentReject;

impl Expr for SilentReject {
    fn init(
        &mut self,
        _args: Vec<Slot>,
        _pattern_index: usize,
        _regexes: &[RegexMatch],
        _log: &mut ParseLog,
    ) -> bool {
        false
    }

    fn is_single(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "rejected".into()
    }
}

fn silent_reject() -> Box<dyn Expr> {
    Box::new(SilentReject)
}

#[derive(Debug)]
struct LoudReject;

impl Expr for LoudReject {
    fn init(
        &mut self,
        _args: Vec<Slot>,
        _pattern_index: usize,
        _regexes: &[RegexMatch],
        log: &mut ParseLog,
    ) -> bool {
        log.error("numbers above nine are not supported here");
        false
    }

    fn is_single(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "rejected".into()
    }
}

fn loud_reject() -> Box<dyn Expr> {
    Box::new(LoudReject)
}

#[derive(Debug, Default)]
struct DelayExpr {
    amount: String,
}

impl Expr for DelayExpr {
    fn init(
        &mut self,
        _args: Vec<Slot>,
        _pattern_index: usize,
        regexes: &[RegexMatch],
        _log: &mut ParseLog,
    ) -> bool {
        self.amount = regexes
            .first()
            .and_then(|m| m.group(0))
            .unwrap_or_default()
            .to_string();
        true
    }

    fn is_single(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("wait {}", self.amount)
    }
}

fn delay_expr() -> Box<dyn Expr> {
    Box::new(DelayExpr::default())
}

#[derive(Debug, Default)]
struct DualRegexExpr {
    groups: Vec<String>,
}

impl Expr for DualRegexExpr {
    fn init(
        &mut self,
        _args: Vec<Slot>,
        _pattern_index: usize,
        regexes: &[RegexMatch],
        _log: &mut ParseLog,
    ) -> bool {
        self.groups = regexes
            .iter()
            .map(|m| m.group(0).unwrap_or_default().to_string())
            .collect();
        true
    }

    fn is_single(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        self.groups.join("/")
    }
}

fn dual_regex_expr() -> Box<dyn Expr> {
    Box::new(DualRegexExpr::default())
}

#[derive(Debug, Default)]
struct PatternIndexExpr {
    index: usize,
}

impl Expr for PatternIndexExpr {
    fn init(
        &mut self,
        _args: Vec<Slot>,
        pattern_index: usize,
        _regexes: &[RegexMatch],
        _log: &mut ParseLog,
    ) -> bool {
        self.index = pattern_index;
        true
    }

    fn is_single(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("pattern {}", self.index)
    }
}

fn pattern_index_expr() -> Box<dyn Expr> {
    Box::new(PatternIndexExpr::default())
}

#[derive(Debug, Default)]
struct JoinEvent {
    player: String,
}

impl EventData for JoinEvent {
    fn init(
        &mut self,
        args: Vec<Slot>,
        _pattern_index: usize,
        _regexes: &[RegexMatch],
        _log: &mut ParseLog,
    ) -> bool {
        self.player = args
            .into_iter()
            .next()
            .flatten()
            .map(|e| e.describe())
            .unwrap_or_default();
        true
    }
}

fn join_event() -> Box<dyn EventData> {
    Box::new(JoinEvent::default())
}

// ----------------------------------------------------------- assertions --

fn parse(
    registry: &Registry,
    log: &mut ParseLog,
    input: &str,
    candidates: &[ExprDef],
) -> Option<Box<dyn Expr>> {
    parse_expression(registry, log, input, candidates, false, None)
        .unwrap_or_else(|err| panic!("unexpected author error: {err}"))
}

fn last_error(log: &ParseLog) -> &str {
    log.entries()
        .iter()
        .rev()
        .find(|entry| entry.level == log::Level::Error)
        .map(|entry| entry.message.as_str())
        .unwrap_or_else(|| panic!("no error was surfaced"))
}

// ----------------------------------------------------------------- tests --

#[rstest]
#[case("the world", "the world of the main world")]
#[case("world", "the world of the main world")]
#[case("the world of Earth", "the world of Earth")]
#[case("world of world \"Nether\"", "the world of world \"Nether\"")]
fn optional_groups_and_defaults(registry: Registry, #[case] input: &str, #[case] expected: &str) {
    let defs = [ExprDef::new("world", &["[the] world [of %world%]"], world_expr)];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, input, &defs).expect("world pattern should match");
    assert_eq!(expr.describe(), expected);
}

#[rstest]
fn unconsumed_input_is_a_silent_mismatch(registry: Registry) {
    let defs = [ExprDef::new("world", &["[the] world [of %world%]"], world_expr)];
    let mut log = ParseLog::new();
    assert!(parse(&registry, &mut log, "the world x", &defs).is_none());
    assert!(log.entries().is_empty());
}

#[rstest]
fn placeholders_bind_across_literal_words(registry: Registry) {
    let defs = [ExprDef::new("give", &["give %itemtype% to %player%"], give_expr)];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "give diamond sword to alice", &defs)
        .expect("give pattern should match");
    assert_eq!(expr.describe(), "give diamond sword to alice");
}

#[rstest]
fn parsing_is_deterministic(registry: Registry) {
    let defs = [ExprDef::new("give", &["give %itemtype% to %player%"], give_expr)];
    let describe = |log: &mut ParseLog| {
        parse(&registry, log, "give diamond sword to alice", &defs)
            .expect("give pattern should match")
            .describe()
    };
    let mut first_log = ParseLog::new();
    let mut second_log = ParseLog::new();
    assert_eq!(describe(&mut first_log), describe(&mut second_log));
    assert_eq!(first_log.entries(), second_log.entries());
}

#[rstest]
fn earlier_registration_wins(registry: Registry) {
    let first = ExprDef::new("first", &["ping"], first_expr);
    let second = ExprDef::new("second", &["ping"], second_expr);
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "ping", &[first.clone(), second.clone()])
        .expect("ping should match");
    assert_eq!(expr.describe(), "first");
    let expr =
        parse(&registry, &mut log, "ping", &[second, first]).expect("ping should match");
    assert_eq!(expr.describe(), "second");
}

#[rstest]
fn alternation_binds_the_leftmost_branch(registry: Registry) {
    let defs = [ExprDef::new(
        "alt",
        &["(x %-player%|x %-itemtype%)"],
        alt_expr,
    )];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "x alice", &defs).expect("alternation should match");
    // The player branch is leftmost, so the itemtype slot stays unbound.
    assert_eq!(expr.describe(), "alt alice <unbound>");
}

#[rstest]
fn alternation_backtracks_to_later_branches(registry: Registry) {
    let defs = [ExprDef::new(
        "gift",
        &["%player% (gives|gave) %item% to %player%"],
        gift_expr,
    )];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "alice gave sword to bob", &defs)
        .expect("second branch should match");
    assert_eq!(expr.describe(), "alice gives sword to bob");
}

#[rstest]
fn three_placeholders_bind_in_source_order(registry: Registry) {
    let defs = [ExprDef::new(
        "gift",
        &["%player% (gives|gave) %item% to %player%"],
        gift_expr,
    )];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "alice gives sword to bob", &defs)
        .expect("gift pattern should match");
    assert_eq!(expr.describe(), "alice gives sword to bob");
}

#[rstest]
fn pattern_index_reports_the_winning_pattern(registry: Registry) {
    let defs = [ExprDef::new(
        "multi",
        &["jump", "crouch"],
        pattern_index_expr,
    )];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "crouch", &defs).expect("second pattern matches");
    assert_eq!(expr.describe(), "pattern 1");
}

#[rstest]
fn quoted_spans_are_atomic(registry: Registry) {
    let defs = [ExprDef::new("say", &["say %string% to %player%"], say_expr)];
    let mut log = ParseLog::new();
    let expr = parse(
        &registry,
        &mut log,
        r#"say "hello to bob" to alice"#,
        &defs,
    )
    .expect("say pattern should match");
    assert_eq!(expr.describe(), "say hello to bob to alice");
}

#[rstest]
fn a_singular_slot_rejects_a_list(registry: Registry) {
    let defs = [ExprDef::new("kill", &["kill %player%"], kill_expr)];
    let mut log = ParseLog::new();
    assert!(parse(&registry, &mut log, "kill alice and bob", &defs).is_none());
    assert_eq!(
        last_error(&log),
        "this expression can only accept a single player, but multiple are given."
    );
}

#[rstest]
fn a_plural_slot_accepts_a_list(registry: Registry) {
    let defs = [ExprDef::new("kill", &["kill %players%"], kill_expr)];
    let mut log = ParseLog::new();
    let expr =
        parse(&registry, &mut log, "kill alice and bob", &defs).expect("plural slot matches");
    assert_eq!(expr.describe(), "kill alice and bob");
}

#[rstest]
fn a_literal_has_no_past_state(registry: Registry) {
    let defs = [ExprDef::new("break", &["break %block@-1%"], break_expr)];
    let mut log = ParseLog::new();
    assert!(parse(&registry, &mut log, "break stone", &defs).is_none());
    assert_eq!(last_error(&log), "stone does not have a past state");
}

#[rstest]
fn a_variable_can_carry_a_tense(registry: Registry) {
    let defs = [ExprDef::new("break", &["break %block@-1%"], break_expr)];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "break {b}", &defs)
        .expect("a curly variable supports any tense");
    assert_eq!(expr.describe(), "break {b}");
}

#[rstest]
fn a_wrong_typed_variable_outranks_not_a_variable(registry: Registry) {
    let defs = [ExprDef::new("kill", &["kill %player%"], kill_expr)];
    let mut log = ParseLog::new();
    assert!(parse(&registry, &mut log, "kill the number 5", &defs).is_none());
    assert_eq!(last_error(&log), "the number 5 is not a player");
}

#[rstest]
fn missing_entity_surfaces_not_a_variable(registry: Registry) {
    let defs = [ExprDef::new("spawn", &["spawn %entity type%"], spawn_expr)];
    let mut log = ParseLog::new();
    assert!(parse(&registry, &mut log, "spawn quxblarg", &defs).is_none());
    assert_eq!(last_error(&log), "'quxblarg' is not an entity type");
}

#[rstest]
fn candidate_order_never_weakens_the_diagnostic(registry: Registry) {
    let kill_player = ExprDef::new("kill player", &["kill %player%"], kill_expr);
    let kill_entity = ExprDef::new("kill entity", &["kill %entity type%"], kill_expr);
    for defs in [
        [kill_player.clone(), kill_entity.clone()],
        [kill_entity, kill_player],
    ] {
        let mut log = ParseLog::new();
        assert!(parse(&registry, &mut log, "kill alice and bob", &defs).is_none());
        assert_eq!(
            last_error(&log),
            "this expression can only accept a single player, but multiple are given.",
            "the semantic diagnostic must win in either candidate order"
        );
    }
}

#[rstest]
fn regex_slots_capture_their_span(registry: Registry) {
    let defs = [ExprDef::new("delay", &[r"<\d+> seconds"], delay_expr)];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "42 seconds", &defs).expect("regex slot matches");
    assert_eq!(expr.describe(), "wait 42");
}

#[rstest]
fn regex_matches_keep_source_pattern_order(registry: Registry) {
    let defs = [ExprDef::new("dual", &[r"<\d+> and <[a-z]+>"], dual_regex_expr)];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "42 and abc", &defs).expect("both slots match");
    assert_eq!(expr.describe(), "42/abc");
}

#[rstest]
fn a_silent_init_reject_continues_the_search(registry: Registry) {
    let defs = [
        ExprDef::new("picky", &["pick %number%"], silent_reject),
        ExprDef::new("fallback", &["pick %number%"], fallback_expr),
    ];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "pick 7", &defs).expect("fallback should win");
    assert_eq!(expr.describe(), "fallback");
    assert!(log.entries().is_empty());
}

#[rstest]
fn a_logged_init_reject_aborts_the_search(registry: Registry) {
    let defs = [
        ExprDef::new("loud", &["pick %number%"], loud_reject),
        ExprDef::new("fallback", &["pick %number%"], fallback_expr),
    ];
    let mut log = ParseLog::new();
    assert!(parse(&registry, &mut log, "pick 12", &defs).is_none());
    assert_eq!(last_error(&log), "numbers above nine are not supported here");
}

#[rstest]
fn literal_fallback_returns_the_unparsed_list(registry: Registry) {
    let mut log = ParseLog::new();
    let expr = parse_expression(&registry, &mut log, "red and blue", &[], true, None)
        .expect("no author errors")
        .expect("fallback produces a literal");
    assert_eq!(expr.describe(), "red and blue");
    assert!(!expr.is_single());
}

#[rstest]
fn the_default_error_surfaces_when_nothing_was_recorded(registry: Registry) {
    let defs = [ExprDef::new("ping", &["ping"], first_expr)];
    let mut log = ParseLog::new();
    let result = parse_expression(
        &registry,
        &mut log,
        "pong",
        &defs,
        false,
        Some("can't understand this condition"),
    )
    .expect("no author errors");
    assert!(result.is_none());
    assert_eq!(last_error(&log), "can't understand this condition");
}

#[rstest]
fn an_unbound_slot_without_a_default_is_an_api_error(registry: Registry) {
    let defs = [ExprDef::new("spawn", &["spawn [%entity type%]"], spawn_expr)];
    let mut log = ParseLog::new();
    let result = parse_expression(&registry, &mut log, "spawn", &defs, false, None);
    assert!(matches!(result, Err(ParseError::MissingDefault { .. })));
}

#[rstest]
fn an_optional_unbound_slot_stays_unbound(registry: Registry) {
    let defs = [ExprDef::new("spawn", &["spawn [%-entity type%]"], spawn_expr)];
    let mut log = ParseLog::new();
    let expr = parse(&registry, &mut log, "spawn", &defs).expect("optional slot may be absent");
    assert_eq!(expr.describe(), "spawn <unbound>");
}

#[rstest]
fn an_unknown_type_is_an_api_error(registry: Registry) {
    let defs = [ExprDef::new("gizmo", &["frob %gizmo%"], first_expr)];
    let mut log = ParseLog::new();
    let result = parse_expression(&registry, &mut log, "frob it", &defs, false, None);
    assert!(matches!(result, Err(ParseError::UnknownType { .. })));
}

#[rstest]
fn empty_input_fails_fast(registry: Registry) {
    let mut log = ParseLog::new();
    let result = parse_expression(&registry, &mut log, "", &[], true, None);
    assert!(matches!(
        result,
        Err(ParseError::Pattern(PatternError::EmptyInput))
    ));
}

#[rstest]
fn weak_failures_stay_quiet_below_the_match_threshold(registry: Registry) {
    // A bare placeholder pattern matches almost no literal text, so a failed
    // resolution is not worth reporting.
    let defs = [ExprDef::new("who", &["%player%"], kill_expr)];
    let mut log = ParseLog::new();
    assert!(parse(&registry, &mut log, "zzz", &defs).is_none());
    assert!(log.entries().is_empty());
}

#[rstest]
fn parse_literal_converts_lists(registry: Registry) {
    let mut log = ParseLog::new();
    let expr = parse_literal(&registry, &mut log, "alice and bob", "player")
        .expect("no author errors")
        .expect("both names are players");
    assert_eq!(expr.describe(), "alice and bob");
    assert!(!expr.is_single());

    let rejected = parse_literal(&registry, &mut log, "alice and quxblarg", "player")
        .expect("no author errors");
    assert!(rejected.is_none());
    assert_eq!(last_error(&log), "'alice and quxblarg' is not a player");
}

#[rstest]
fn events_parse_statically(registry: Registry) {
    let mut registry = registry;
    registry.register_event(EventDef::new("join", &["join of %player%"], join_event));
    let mut log = ParseLog::new();
    let (def, _event) = parse_event(&registry, &mut log, "join of alice", None)
        .expect("no author errors")
        .expect("the join header matches");
    assert_eq!(def.name(), "join");

    // Variables never parse inside an event header.
    let mut log = ParseLog::new();
    let result =
        parse_event(&registry, &mut log, "join of {p}", None).expect("no author errors");
    assert!(result.is_none());
    assert_eq!(last_error(&log), "'{p}' is not a player");
}
