//! Count tables sorted by descending frequency.

use std::{fmt, hash::Hash};

use indexmap::IndexMap;
use serde::Serialize;

/// Occurrence counts, sorted by count descending with ties in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Hash + Eq> {
    counts: IndexMap<K, usize>,
}

impl<K: Hash + Eq> FrequencyTable<K> {
    pub fn empty() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn get(&self, key: &K) -> Option<usize> {
        self.counts.get(key).copied()
    }

    /// Full table, most frequent first.
    pub fn entries(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// The `k` most frequent entries.
    pub fn top(&self, k: usize) -> Vec<(&K, usize)> {
        self.entries().take(k).collect()
    }
}

impl<K: Hash + Eq + fmt::Display> FrequencyTable<K> {
    /// `(label, count)` rows for reports and JSON output.
    pub fn labelled(&self, k: usize) -> Vec<(String, usize)> {
        self.entries()
            .take(k)
            .map(|(key, count)| (key.to_string(), count))
            .collect()
    }
}

impl<K: Hash + Eq> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: Hash + Eq> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counts: IndexMap<K, usize> = IndexMap::new();
        for key in iter {
            *counts.entry(key).or_insert(0) += 1;
        }
        // Stable sort keeps first-seen order among equal counts.
        counts.sort_by(|_, a, _, b| b.cmp(a));
        Self { counts }
    }
}

/// Contiguous run of `n` tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NGram(pub Vec<String>);

impl NGram {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for NGram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
