//! Small English-language helpers used when resolving placeholder names
//! and composing diagnostics.

/// Suffix pairs tried in order; the first plural suffix that matches (and
/// whose guard allows stripping) wins.
const PLURAL_SUFFIXES: &[(&str, &str)] = &[
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("xes", "x"),
    ("ies", "y"),
    ("ves", "f"),
    ("s", ""),
];

/// Split a possibly-plural English name into its singular base and a plural
/// flag.
///
/// # Examples
/// ```
/// use parlance::english_plural;
///
/// assert_eq!(english_plural("players"), ("player".to_string(), true));
/// assert_eq!(english_plural("itemtype"), ("itemtype".to_string(), false));
/// assert_eq!(english_plural("glass"), ("glass".to_string(), false));
/// ```
#[must_use]
pub fn english_plural(name: &str) -> (String, bool) {
    for (plural, singular) in PLURAL_SUFFIXES {
        if let Some(stem) = name.strip_suffix(plural) {
            if *plural == "s" && (stem.is_empty() || stem.ends_with('s')) {
                continue;
            }
            return (format!("{stem}{singular}"), true);
        }
    }
    (name.to_string(), false)
}

/// Prefix `name` with its indefinite article.
///
/// # Examples
/// ```
/// use parlance::a_an;
///
/// assert_eq!(a_an("entity type"), "an entity type");
/// assert_eq!(a_an("player"), "a player");
/// ```
#[must_use]
pub fn a_an(name: &str) -> String {
    let article = match name.chars().next() {
        Some(c) if matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{article} {name}")
}
