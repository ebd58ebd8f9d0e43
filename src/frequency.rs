//! Occurrence counting with tie-preserving peak detection.

use std::collections::HashMap;
use std::hash::Hash;

/// Counts of observed values, iterated in order of first occurrence.
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {
    counts: HashMap<T, usize>,
    order: Vec<T>,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> FrequencyTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one observation into the table.
    pub fn record(mut self, value: T) -> Self {
        self.observe(value);
        self
    }

    /// Increments the count for `value`, starting it at 1 if unseen.
    pub fn observe(&mut self, value: T) {
        self.add(value, 1);
    }

    fn add(&mut self, value: T, n: usize) {
        match self.counts.get_mut(&value) {
            Some(count) => *count += n,
            None => {
                self.order.push(value.clone());
                self.counts.insert(value, n);
            }
        }
    }

    pub fn count(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.order.iter().map(|v| (v, self.counts[v]))
    }

    /// Highest count in the table, or `None` if nothing was observed.
    pub fn max_frequency(&self) -> Option<usize> {
        self.counts.values().copied().max()
    }

    /// Every value whose count equals [`max_frequency`](Self::max_frequency),
    /// in first-occurrence order. Empty only for an empty table.
    pub fn peak_values(&self) -> Vec<T> {
        let Some(max) = self.max_frequency() else {
            return Vec::new();
        };
        self.iter()
            .filter(|(_, count)| *count == max)
            .map(|(value, _)| value.clone())
            .collect()
    }

    /// Sums the counts of `other` into `self`. Values first seen in `other`
    /// are ordered after those already present.
    pub fn merge(mut self, other: FrequencyTable<T>) -> Self {
        let FrequencyTable { mut counts, order } = other;
        for value in order {
            if let Some(n) = counts.remove(&value) {
                self.add(value, n);
            }
        }
        self
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for FrequencyTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::record)
    }
}
