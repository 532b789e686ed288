//! Types for suffix index construction.

use serde::{Deserialize, Serialize};

/// Byte offset into the indexed text. One suffix entry exists per offset.
pub type TextOffset = usize;

/// Configuration for suffix index construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixIndexConfig {
    /// Minimum text size before sorting runs on the rayon pool.
    /// Below this threshold sequential sorting is faster.
    pub parallel_sort_threshold: usize,
}

impl Default for SuffixIndexConfig {
    fn default() -> Self {
        Self {
            parallel_sort_threshold: 100_000,
        }
    }
}
