//! # OCC - Substring Occurrence Counter
//!
//! OCC counts, for a fixed text and a batch of query patterns, how many
//! times each pattern occurs as a substring (overlaps included), and how
//! many pattern occurrences a single left-to-right scan encounters.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Suffix index construction and lexicographic ordering
//! - [`query`] - Range counting and concurrent batch dispatch
//! - [`scan`] - Trie and linear scanning backends over the raw text
//! - [`output`] - Result formatting for the CLI
//!
//! ## Quick Start
//!
//! ```
//! use occ::query::{DispatchConfig, count_batch};
//!
//! let text = b"abcdeabcdabcdeabcdeabcd";
//! let patterns: Vec<String> = ["abc", "bcd", "abcde"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let results = count_batch(text, &patterns, DispatchConfig::default()).unwrap();
//! assert_eq!(results[0].count(), Some(5));
//! assert_eq!(results[1].count(), Some(5));
//! assert_eq!(results[2].count(), Some(3));
//! ```
//!
//! ## Backends
//!
//! The suffix-index path answers each query in O(m log n) via binary search
//! over sorted suffixes, and a batch is dispatched across a bounded worker
//! pool reading the shared immutable index. The trie path walks a prefix
//! trie over the pattern set in one pass over the text and reports a single
//! aggregate total. The linear path scans per pattern with `memmem` and
//! serves as the reference implementation.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod scan;

// Re-exports for convenience
pub use error::CountError;
pub use index::SuffixIndex;
pub use query::{BatchDispatcher, DispatchConfig, MatchCount, count_batch};
pub use scan::{PatternTrie, scan_total};
