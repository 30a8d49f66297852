//! Utility helpers organized by small, focused structs.
//! All functions are associated fns to keep call sites
//! ergonomic, testable, and discoverable.

use indexmap::IndexSet;

/// Character-aware text helpers (never split a code point)
pub struct TextUtils;

impl TextUtils
{
    /// Keep only the last `max_chars` characters of `s`
    pub fn tail_chars(
        s: &str,
        max_chars: usize,
    ) -> &str
    {
        // Count once; short strings pass through untouched
        let total = s
            .chars()
            .count();
        if total <= max_chars
        {
            return s;
        }

        // Byte offset of the first kept character
        let skip = total - max_chars;
        let start = s
            .char_indices()
            .nth(skip)
            .map(|(i, _)| i)
            .unwrap_or(s.len());

        &s[start..]
    }

    /// First `max_chars` characters, with `…` appended when cut
    pub fn ellipsize(
        s: &str,
        max_chars: usize,
    ) -> String
    {
        let mut out: String = s
            .chars()
            .take(max_chars)
            .collect();
        if s.chars()
            .count()
            > max_chars
        {
            out.push('…');
        }
        out
    }
}

/// Ordered list helpers
pub struct ListUtils;

impl ListUtils
{
    /// De-duplicate while preserving first occurrence order
    pub fn dedup_ordered<I, T>(items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        T: std::hash::Hash + Eq,
    {
        items
            .into_iter()
            .collect::<IndexSet<T>>()
            .into_iter()
            .collect()
    }
}
