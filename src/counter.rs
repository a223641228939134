//! Frequency counters and top-K selection.
//!
//! Counters remember the order in which keys were first observed, and
//! rankings break ties by that order: of two keys with the same count, the
//! one seen earlier comes first.

use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Number of entries in every ranking.
pub const TOP_K: usize = 10;

#[derive(Clone, Debug, Default)]
pub struct Counter {
    counts: IndexMap<String, u64>,
}

impl Counter {
    pub fn new() -> Counter {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Counter {
        Counter {
            counts: IndexMap::with_capacity(capacity),
        }
    }

    /// Record one occurrence of `key`.
    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in first-observed order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }

    pub fn most_common(&self, k: usize) -> Vec<(&str, u64)> {
        top_k(self.counts.values().copied(), k)
            .into_iter()
            .filter_map(|index| self.counts.get_index(index))
            .map(|(key, count)| (key.as_str(), *count))
            .collect()
    }

    /// The single most frequent key.
    pub fn top(&self) -> Option<(&str, u64)> {
        self.most_common(1).into_iter().next()
    }
}

/// Two-level counter: bucket key to a counter over secondary keys.
#[derive(Clone, Debug, Default)]
pub struct NestedCounter {
    buckets: IndexMap<String, Counter>,
}

impl NestedCounter {
    pub fn new() -> NestedCounter {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> NestedCounter {
        NestedCounter {
            buckets: IndexMap::with_capacity(capacity),
        }
    }

    pub fn increment(&mut self, bucket: &str, key: &str) {
        match self.buckets.get_mut(bucket) {
            Some(counter) => counter.increment(key),
            None => {
                let mut counter = Counter::new();
                counter.increment(key);
                self.buckets.insert(bucket.to_string(), counter);
            }
        }
    }

    pub fn bucket(&self, bucket: &str) -> Option<&Counter> {
        self.buckets.get(bucket)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets ranked by the sum of their counts.
    pub fn most_common_buckets(&self, k: usize) -> Vec<(&str, u64)> {
        let totals = self
            .buckets
            .values()
            .map(|counter| counter.total())
            .collect::<Vec<_>>();

        top_k(totals.iter().copied(), k)
            .into_iter()
            .filter_map(|index| {
                self.buckets
                    .get_index(index)
                    .map(|(bucket, _)| (bucket.as_str(), totals[index]))
            })
            .collect()
    }
}

/// Select the positions of the `k` largest counts, largest first.
///
/// Counts are given in first-observed order; among equal counts the lower
/// position wins. Uses a heap bounded to `k` entries.
pub fn top_k<I: IntoIterator<Item = u64>>(counts: I, k: usize) -> Vec<usize> {
    if k == 0 {
        return vec![];
    }

    let mut heap = BinaryHeap::with_capacity(k + 1);

    for (index, count) in counts.into_iter().enumerate() {
        heap.push(Reverse((count, Reverse(index))));

        if heap.len() > k {
            heap.pop();
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse((_, Reverse(index)))| index)
        .collect()
}
