//! Value counting with deterministic ranking.
//!
//! [`FrequencyCounter`] remembers where each value was first seen so ranking
//! by count never depends on hash order: equal counts keep source-table
//! order.

use std::{collections::HashMap, hash::Hash};

use itertools::Itertools;

#[derive(Debug, Clone)]
pub struct FrequencyCounter<K> {
    counts: HashMap<K, Tally>,
    total: usize,
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    count: usize,
    first_seen: usize,
}

impl<K> Default for FrequencyCounter<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            total: 0,
        }
    }
}

impl<K> FrequencyCounter<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&mut self, value: K) {
        let first_seen = self.counts.len();
        self.counts
            .entry(value)
            .or_insert(Tally {
                count: 0,
                first_seen,
            })
            .count += 1;
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// All values, highest count first; ties keep first-occurrence order.
    pub fn ranked(&self) -> Vec<(K, usize)> {
        self.counts
            .iter()
            .sorted_by(|a, b| {
                b.1.count
                    .cmp(&a.1.count)
                    .then_with(|| a.1.first_seen.cmp(&b.1.first_seen))
            })
            .map(|(value, tally)| (value.clone(), tally.count))
            .collect()
    }

    pub fn top(&self, limit: usize) -> Vec<(K, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(limit);
        ranked
    }

    pub fn most_common(&self) -> Option<(K, usize)> {
        self.ranked().into_iter().next()
    }

    /// Lowest count; among ties the value first seen last, i.e. the final
    /// entry of [`ranked`](Self::ranked).
    pub fn least_common(&self) -> Option<(K, usize)> {
        self.ranked().into_iter().last()
    }
}

impl<K> FromIterator<K> for FrequencyCounter<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        for value in iter {
            counter.ingest(value);
        }
        counter
    }
}
