//! Suffix index construction and ordering.
//!
//! Materializes one entry per starting offset of the text, then sorts the
//! entries lexicographically by the suffix each one references. After the
//! sort, all suffixes sharing a common prefix occupy one contiguous range of
//! the index; the range counter's binary search relies on exactly that.

use crate::error::CountError;
use crate::index::types::{SuffixIndexConfig, TextOffset};
use rayon::prelude::*;
use std::cmp::Ordering;

/// A sorted suffix index over a borrowed text buffer.
///
/// Entries are byte offsets into `text`; the suffix for an entry is the
/// slice from that offset to the end of the text, derived on demand.
/// Entries never copy text content. The index is immutable after
/// construction and is shared read-only across worker threads during
/// dispatch.
pub struct SuffixIndex<'t> {
    text: &'t [u8],
    entries: Vec<TextOffset>,
}

impl<'t> SuffixIndex<'t> {
    /// Build a sorted suffix index over `text` with default configuration.
    pub fn build(text: &'t [u8]) -> Result<Self, CountError> {
        Self::build_with_config(text, &SuffixIndexConfig::default())
    }

    /// Build a sorted suffix index over `text`.
    ///
    /// Fails with [`CountError::Allocation`] if entry storage cannot be
    /// obtained; no partial index is ever returned. An empty text yields an
    /// empty index.
    pub fn build_with_config(
        text: &'t [u8],
        config: &SuffixIndexConfig,
    ) -> Result<Self, CountError> {
        let n = text.len();

        let mut entries: Vec<TextOffset> = Vec::new();
        entries
            .try_reserve_exact(n)
            .map_err(|_| CountError::Allocation { entries: n })?;
        entries.extend(0..n);

        // Sort by full suffix content. Comparisons are never truncated:
        // relative order must not depend on any later query's length.
        if n > config.parallel_sort_threshold {
            entries.par_sort_unstable_by(|&a, &b| compare_suffixes(text, a, b));
        } else {
            entries.sort_unstable_by(|&a, &b| compare_suffixes(text, a, b));
        }

        Ok(Self { text, entries })
    }

    /// Number of suffix entries (equals the text length).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The indexed text.
    #[inline]
    pub fn text(&self) -> &'t [u8] {
        self.text
    }

    /// Starting offset of the suffix at sorted position `i`.
    #[inline]
    pub fn offset_at(&self, i: usize) -> TextOffset {
        self.entries[i]
    }

    /// The suffix at sorted position `i`, borrowed from the text buffer.
    #[inline]
    pub fn suffix_at(&self, i: usize) -> &'t [u8] {
        &self.text[self.entries[i]..]
    }
}

/// Compare two suffixes of `text` lexicographically by full content.
///
/// All suffixes of a text have distinct lengths, so two distinct entries
/// never compare equal and no tie-break is needed.
#[inline]
fn compare_suffixes(text: &[u8], a: TextOffset, b: TextOffset) -> Ordering {
    text[a..].cmp(&text[b..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_simple() {
        let index = SuffixIndex::build(b"banana").unwrap();
        assert_eq!(index.len(), 6);
    }

    #[test]
    fn test_sorted_order() {
        let index = SuffixIndex::build(b"banana").unwrap();

        // Sorted suffixes of "banana":
        // 5: a
        // 3: ana
        // 1: anana
        // 0: banana
        // 4: na
        // 2: nana
        let offsets: Vec<TextOffset> = (0..index.len()).map(|i| index.offset_at(i)).collect();
        assert_eq!(offsets, vec![5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_suffix_views_borrow_text() {
        let text = b"abab";
        let index = SuffixIndex::build(text).unwrap();

        for i in 0..index.len() {
            let suffix = index.suffix_at(i);
            assert_eq!(suffix, &text[index.offset_at(i)..]);
        }
    }

    #[test]
    fn test_adjacent_entries_are_ordered() {
        let index = SuffixIndex::build(b"mississippi").unwrap();
        for i in 1..index.len() {
            assert!(index.suffix_at(i - 1) < index.suffix_at(i));
        }
    }

    #[test]
    fn test_empty_text() {
        let index = SuffixIndex::build(b"").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_parallel_sort_matches_sequential() {
        let text: Vec<u8> = b"abcde".iter().cycle().take(512).copied().collect();

        let sequential = SuffixIndex::build(&text).unwrap();
        let parallel = SuffixIndex::build_with_config(
            &text,
            &SuffixIndexConfig {
                parallel_sort_threshold: 0,
            },
        )
        .unwrap();

        let seq: Vec<TextOffset> = (0..sequential.len()).map(|i| sequential.offset_at(i)).collect();
        let par: Vec<TextOffset> = (0..parallel.len()).map(|i| parallel.offset_at(i)).collect();
        assert_eq!(seq, par);
    }
}
