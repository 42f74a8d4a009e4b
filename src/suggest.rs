//! Identifier suggestions while typing
//!
//! Matching is plain substring containment on upper-cased text, in both
//! directions by default: `A1` suggests `A123B4` (prefix typing) and
//! `A123B4X` still suggests `A123B4` (typed past the end). Results keep the
//! order of the identifier list and are truncated, never ranked.

/// Default number of suggestions shown
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// How typed text is compared with known identifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Identifier contains the text, or the text contains the identifier
    #[default]
    Symmetric,
    /// Identifier contains the text
    Contains,
}

impl MatchMode {
    fn matches(self, id: &str, text: &str) -> bool {
        match self {
            MatchMode::Symmetric => id.contains(text) || text.contains(id),
            MatchMode::Contains => id.contains(text),
        }
    }
}

/// Suggest identifiers for partially typed text using [`MatchMode::Symmetric`]
pub fn suggest<S: AsRef<str>>(partial: &str, known_ids: &[S], limit: usize) -> Vec<String> {
    suggest_with_mode(partial, known_ids, limit, MatchMode::Symmetric)
}

/// Up to `limit` known identifiers matching `partial` under `mode`.
///
/// Matching is case-insensitive and keeps the order of `known_ids`; empty
/// input yields nothing.
pub fn suggest_with_mode<S: AsRef<str>>(
    partial: &str,
    known_ids: &[S],
    limit: usize,
    mode: MatchMode,
) -> Vec<String> {
    if partial.is_empty() {
        return Vec::new();
    }

    let text = partial.to_uppercase();
    known_ids
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| mode.matches(id, &text))
        .take(limit)
        .map(str::to_string)
        .collect()
}
