//! Small numeric helpers shared by the aggregators.

use crate::parser::Rate;
use std::collections::HashMap;
use std::hash::Hash;

/// `100 * numerator / denominator`, or `None` when the denominator is zero
pub fn percentage(numerator: usize, denominator: usize) -> Rate {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64 * 100.0)
    }
}

/// Round to `places` decimals on the exact value of the float
///
/// Exact ties go to the even digit, so 3.125 becomes 3.12.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Seconds in a chrono duration, with sub-second precision
pub fn duration_seconds(duration: chrono::Duration) -> f64 {
    match duration.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => duration.num_seconds() as f64,
    }
}

/// Occurrence counter that remembers first-appearance order.
///
/// `ranked` sorts by count descending with a stable sort, so equal counts
/// keep the order in which keys were first seen.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    positions: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K: Hash + Eq + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, key: K) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// All entries, most frequent first
    pub fn ranked(mut self) -> Vec<(K, usize)> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries
    }

    /// The `n` most frequent entries
    pub fn top(self, n: usize) -> Vec<(K, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<K: Hash + Eq + Clone> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}
