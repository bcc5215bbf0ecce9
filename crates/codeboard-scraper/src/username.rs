//! Fallback identity derived from a profile URL.

use crate::types::NOT_AVAILABLE;

/// Returns the last non-empty `/`-separated segment of `url`.
///
/// Used whenever a page's own username cannot be read. Both LeetCode shapes
/// (`leetcode.com/alice` and `leetcode.com/u/alice/`) resolve to `alice`.
/// A blank URL, or one with no segments at all, yields `"N/A"`.
#[must_use]
pub fn resolve_username(url: &str) -> String {
    url.trim()
        .trim_end_matches('/')
        .rsplit('/')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}
