//! Subsequence match predicate used to filter candidates.
//!
//! A query matches when its characters appear in the candidate text in the
//! same relative order, not necessarily contiguous. Comparison is
//! case-insensitive via simple lowercase folding.

/// Returns true if `query` is a case-insensitive subsequence of `text`.
///
/// An empty query matches everything, including empty text. The scan is
/// greedy and only ever moves forward through `text`, so the cost is linear
/// in the text length regardless of how long the query is.
#[must_use]
pub fn matches(text: &str, query: &str) -> bool {
    let mut haystack = text.chars().flat_map(char::to_lowercase);

    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|needle| haystack.any(|c| c == needle))
}
