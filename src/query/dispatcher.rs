//! Concurrent batch dispatch.
//!
//! Fans one counting task per query pattern out across a bounded pool of
//! scoped worker threads. Every worker reads the same immutable sorted
//! index; each unit's result is tagged with its input position, so no lock
//! guards the counting logic and output order never depends on completion
//! order. The scope join is the barrier: the call returns only after every
//! unit has finished, and no worker outlives it.

use crate::error::CountError;
use crate::index::SuffixIndex;
use crate::query::counter;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Configuration for batch dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Number of worker threads; 0 resolves to available parallelism.
    /// The bound is independent of the number of queries in a batch.
    pub worker_count: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { worker_count: 0 }
    }
}

impl DispatchConfig {
    /// Get the effective worker count (resolves 0 to CPU count).
    pub fn effective_worker_count(&self) -> usize {
        if self.worker_count == 0 {
            num_cpus()
        } else {
            self.worker_count
        }
    }
}

/// Get the number of CPUs available
fn num_cpus() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Result slot for one query in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCount {
    /// The query pattern, as submitted.
    pub pattern: String,
    /// Occurrence count, or the per-query error that replaced it.
    pub outcome: Result<u64, CountError>,
}

impl MatchCount {
    /// The count, if the query succeeded.
    pub fn count(&self) -> Option<u64> {
        self.outcome.as_ref().ok().copied()
    }
}

/// Batch dispatcher over a shared sorted suffix index.
pub struct BatchDispatcher<'a, 't> {
    index: &'a SuffixIndex<'t>,
    config: DispatchConfig,
}

impl<'a, 't> BatchDispatcher<'a, 't> {
    /// Create a dispatcher with default configuration.
    pub fn new(index: &'a SuffixIndex<'t>) -> Self {
        Self::with_config(index, DispatchConfig::default())
    }

    /// Create a dispatcher with an explicit configuration.
    pub fn with_config(index: &'a SuffixIndex<'t>, config: DispatchConfig) -> Self {
        Self { index, config }
    }

    /// Count every pattern in `patterns` against the shared index.
    ///
    /// Returns one [`MatchCount`] per input pattern, in input order,
    /// regardless of completion order across workers. A unit that fails
    /// records its error in its own slot without aborting its siblings;
    /// an empty pattern yields a [`CountError::InvalidQuery`] slot while
    /// the rest of the batch still counts. No partial result set is ever
    /// observable outside this call.
    pub fn dispatch(&self, patterns: &[String]) -> Result<Vec<MatchCount>, CountError> {
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        let worker_count = self.config.effective_worker_count().min(patterns.len());

        // Workers claim units off a shared cursor and tag each result with
        // its input position. The scope joins every worker before returning.
        let next_unit = AtomicUsize::new(0);
        let joined: Result<Vec<thread::Result<Vec<(usize, MatchCount)>>>, CountError> =
            thread::scope(|scope| {
                let mut handles = Vec::with_capacity(worker_count);
                for _ in 0..worker_count {
                    let handle = thread::Builder::new()
                        .spawn_scoped(scope, || {
                            let mut produced = Vec::new();
                            loop {
                                let i = next_unit.fetch_add(1, Ordering::Relaxed);
                                let Some(pattern) = patterns.get(i) else {
                                    break;
                                };
                                produced.push((
                                    i,
                                    MatchCount {
                                        pattern: pattern.clone(),
                                        outcome: self.count_one(pattern),
                                    },
                                ));
                            }
                            produced
                        })
                        .map_err(|e| CountError::PoolStart(e.to_string()))?;
                    handles.push(handle);
                }

                Ok(handles.into_iter().map(|h| h.join()).collect())
            });

        let mut slots: Vec<Option<MatchCount>> = vec![None; patterns.len()];
        for worker in joined? {
            // A worker panic outside a counting unit leaves its claimed
            // units unfilled; those get explicit failure markers below.
            if let Ok(produced) = worker {
                for (i, result) in produced {
                    slots[i] = Some(result);
                }
            }
        }

        let results = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.unwrap_or_else(|| MatchCount {
                    pattern: patterns[i].clone(),
                    outcome: Err(CountError::WorkerFailure {
                        pattern: patterns[i].clone(),
                        reason: "worker terminated before reporting".to_string(),
                    }),
                })
            })
            .collect();

        Ok(results)
    }

    /// Execute one counting unit, isolating any internal failure.
    fn count_one(&self, pattern: &str) -> Result<u64, CountError> {
        let unit = panic::catch_unwind(AssertUnwindSafe(|| {
            counter::count_occurrences(self.index, pattern.as_bytes())
        }));

        match unit {
            Ok(outcome) => outcome,
            Err(payload) => Err(CountError::WorkerFailure {
                pattern: pattern.to_string(),
                reason: panic_message(&payload),
            }),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Build a sorted suffix index over `text` and count every pattern in one
/// call.
///
/// Index construction failures abort the whole call; per-query failures
/// surface in their slots of the returned batch.
pub fn count_batch(
    text: &[u8],
    patterns: &[String],
    config: DispatchConfig,
) -> Result<Vec<MatchCount>, CountError> {
    let index = SuffixIndex::build(text)?;
    BatchDispatcher::with_config(&index, config).dispatch(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_results_in_input_order() {
        let batch = patterns(&["na", "banana", "an", "zzz"]);
        let results = count_batch(b"banana", &batch, DispatchConfig::default()).unwrap();

        let got: Vec<(&str, Option<u64>)> = results
            .iter()
            .map(|r| (r.pattern.as_str(), r.count()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("na", Some(2)),
                ("banana", Some(1)),
                ("an", Some(2)),
                ("zzz", Some(0)),
            ]
        );
    }

    #[test]
    fn test_idempotent_across_worker_counts() {
        let batch = patterns(&["ab", "abc", "cde", "e", "nope"]);
        let text = b"abcdeabcdabcdeabcdeabcd";

        let baseline = count_batch(text, &batch, DispatchConfig { worker_count: 1 }).unwrap();
        for workers in [2, 3, 8] {
            let results =
                count_batch(text, &batch, DispatchConfig { worker_count: workers }).unwrap();
            assert_eq!(results, baseline);
        }
    }

    #[test]
    fn test_empty_pattern_isolated() {
        let batch = patterns(&["an", "", "na"]);
        let results = count_batch(b"banana", &batch, DispatchConfig::default()).unwrap();

        assert_eq!(results[0].count(), Some(2));
        assert!(matches!(
            results[1].outcome,
            Err(CountError::InvalidQuery { .. })
        ));
        assert_eq!(results[2].count(), Some(2));
    }

    #[test]
    fn test_duplicate_patterns_each_get_a_slot() {
        let batch = patterns(&["an", "an"]);
        let results = count_batch(b"banana", &batch, DispatchConfig::default()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].count(), Some(2));
        assert_eq!(results[1].count(), Some(2));
    }

    #[test]
    fn test_empty_batch() {
        let results = count_batch(b"banana", &[], DispatchConfig::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_more_workers_than_queries() {
        let batch = patterns(&["an"]);
        let results =
            count_batch(b"banana", &batch, DispatchConfig { worker_count: 16 }).unwrap();
        assert_eq!(results[0].count(), Some(2));
    }

    #[test]
    fn test_effective_worker_count_resolves_zero() {
        let config = DispatchConfig::default();
        assert!(config.effective_worker_count() >= 1);

        let fixed = DispatchConfig { worker_count: 3 };
        assert_eq!(fixed.effective_worker_count(), 3);
    }
}
