//! Query evaluation over the sorted suffix index.
//!
//! - `counter`: leftmost-match binary search and contiguous-run counting
//! - `dispatcher`: bounded worker pool fanning a query batch across threads

pub mod counter;
pub mod dispatcher;

// Re-exports for convenience
pub use counter::count_occurrences;
pub use dispatcher::{BatchDispatcher, DispatchConfig, MatchCount, count_batch};
