//! Fallback subject-id matching.
//!
//! The identity provider's subject id reaches us through several clients and
//! imports, and stored ids sometimes carry whitespace, zero-width characters,
//! JSON quoting or truncation. When exact lookups fail, the resolver scans all
//! active rows with the strategies below, strictest first.

use crate::domain::types::RoleAssignment;

/// Characters compared at the start of both ids by [`MatchStrategy::PrefixSuffix`].
pub const PREFIX_LEN: usize = 15;
/// Characters compared at the end of both ids by [`MatchStrategy::PrefixSuffix`].
pub const SUFFIX_LEN: usize = 10;

/// One predicate `(stored, query) -> bool` in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Byte-for-byte equality.
    Exact,
    /// Equality after removing invisible characters and trimming whitespace.
    Normalized,
    /// Equality after decoding JSON-quoted strings (`"\"usr_1\""` == `usr_1`).
    Serialized,
    /// Either normalized id contains the other. Both must be non-empty.
    Containment,
    /// First [`PREFIX_LEN`] and last [`SUFFIX_LEN`] characters agree.
    ///
    /// Can match unrelated ids that happen to share both ends; kept because
    /// ids truncated in the middle by copy/paste are otherwise unreachable.
    PrefixSuffix,
}

impl MatchStrategy {
    /// Strictest first. The scan order of the fallback chain.
    pub const ORDERED: [MatchStrategy; 5] = [
        Self::Exact,
        Self::Normalized,
        Self::Serialized,
        Self::Containment,
        Self::PrefixSuffix,
    ];

    pub fn matches(self, stored: &str, query: &str) -> bool {
        match self {
            Self::Exact => stored == query,
            Self::Normalized => normalize_subject(stored) == normalize_subject(query),
            Self::Serialized => canonical(stored) == canonical(query),
            Self::Containment => contains_either(&canonical(stored), &canonical(query)),
            Self::PrefixSuffix => prefix_suffix_equal(&canonical(stored), &canonical(query)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Normalized => "normalized",
            Self::Serialized => "serialized",
            Self::Containment => "containment",
            Self::PrefixSuffix => "prefix_suffix",
        }
    }
}

/// Zero-width and formatting characters that survive copy/paste unseen.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
    ) || c.is_control()
}

/// Remove invisible characters, then trim surrounding whitespace.
pub fn normalize_subject(raw: &str) -> String {
    let visible: String = raw.chars().filter(|c| !is_invisible(*c)).collect();
    visible.trim().to_owned()
}

/// Normalized form with one level of JSON string quoting removed, if present.
fn canonical(raw: &str) -> String {
    let normalized = normalize_subject(raw);
    if normalized.starts_with('"') {
        if let Ok(decoded) = serde_json::from_str::<String>(&normalized) {
            return normalize_subject(&decoded);
        }
    }
    normalized
}

fn contains_either(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

fn prefix_suffix_equal(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len() < PREFIX_LEN || b.len() < PREFIX_LEN {
        return false;
    }
    let suffix = |s: &[char]| s[s.len().saturating_sub(SUFFIX_LEN)..].to_vec();
    a[..PREFIX_LEN] == b[..PREFIX_LEN] && suffix(&a) == suffix(&b)
}

/// Scan `rows` strategy by strategy: every row is tried with the strictest
/// strategy before any row is tried with the next. Inactive rows are skipped.
pub fn fallback_match<'a>(
    rows: &'a [RoleAssignment],
    subject_id: &str,
) -> Option<(&'a RoleAssignment, MatchStrategy)> {
    MatchStrategy::ORDERED.into_iter().find_map(|strategy| {
        rows.iter()
            .filter(|row| row.is_active)
            .find(|row| strategy.matches(&row.user_id, subject_id))
            .map(|row| (row, strategy))
    })
}
