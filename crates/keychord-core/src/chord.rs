//! Combination-string parsing and canonical ordering.
//!
//! Every key spec a caller hands the engine, and every held-key set the
//! dispatcher matches against, is reduced to one canonical spelling here so
//! that `"Cmd + Shift+a"`, `"shift+meta+a"`, and `"⌘+⇧+a"` all land on the
//! same registry entry.

use std::cmp::Ordering;

/// Combination key that matches every dispatched chord.
pub const WILDCARD_KEY: &str = "*";

/// Canonical modifier names, in the order they appear in a normalized
/// combination. Non-modifier keys follow, sorted lexicographically.
pub const MODIFIER_ORDER: &[&str] = &["caps", "ctrl", "meta", "shift", "alt"];

/// Accepted spellings for modifier keys, mapped to their canonical names.
const MODIFIER_ALIASES: &[(&str, &str)] = &[
    ("option", "alt"),
    ("command", "meta"),
    ("cmd", "meta"),
    ("control", "ctrl"),
    ("capslock", "caps"),
    ("\u{21e7}", "shift"),
    ("\u{2325}", "alt"),
    ("\u{2303}", "ctrl"),
    ("\u{2318}", "meta"),
    ("\u{21a9}\u{fe0e}", "enter"),
];

fn resolve_alias(token: &str) -> &str {
    MODIFIER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(token)
}

fn modifier_rank(token: &str) -> Option<usize> {
    MODIFIER_ORDER.iter().position(|name| *name == token)
}

/// Split `value` on `separator`, merging empty fragments back into their
/// left neighbor so a trailing or doubled separator reads as a literal key.
///
/// `"a+b+c"` splits into `a`, `b`, `c`; `"a+b+"` into `a`, `b+`; `"+"` into
/// `+`. An empty input yields no parts.
pub fn safe_split(value: &str, separator: char) -> Vec<String> {
    let mut parts: Vec<String> = value.split(separator).map(str::to_string).collect();

    while let Some(index) = parts.iter().rposition(String::is_empty) {
        if index > 0 {
            parts[index - 1].push(separator);
        }
        parts.remove(index);
    }

    parts
}

/// Split a key spec into its comma-separated combinations, whitespace
/// stripped. A combination ending in a literal comma survives intact.
pub fn split_combinations(spec: &str) -> Vec<String> {
    let stripped: String = spec.chars().filter(|c| !c.is_whitespace()).collect();
    safe_split(&stripped, ',')
}

/// Normalize a combination joined with `+`.
///
/// Strips whitespace, lowercases, resolves modifier aliases, and reorders
/// tokens: modifiers first in [`MODIFIER_ORDER`], everything else after in
/// lexicographic order.
pub fn normalize_combination(key: &str) -> String {
    normalize_combination_with(key, '+')
}

/// [`normalize_combination`] with an explicit token separator.
pub fn normalize_combination_with(key: &str, separator: char) -> String {
    let stripped: String = key.chars().filter(|c| !c.is_whitespace()).collect();
    let lowered = stripped.to_lowercase();

    let mut tokens: Vec<String> = safe_split(&lowered, separator)
        .into_iter()
        .map(|token| resolve_alias(&token).to_string())
        .collect();

    tokens.sort_by(|a, b| match (modifier_rank(a), modifier_rank(b)) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    });

    let separator = separator.to_string();
    tokens.join(separator.as_str())
}
