//! Insertion-ordered occurrence counter.
//!
//! Every ranking in the taste pipeline is "count descending, ties broken by
//! the order keys were first seen". `Tally` records both, so ranking is a
//! stable sort over first-seen order.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Counts of keys, remembering the order each key was first added.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, u32)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Count one more occurrence of `key`.
    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Occurrences of `key` (0 if never seen).
    pub fn get(&self, key: &K) -> u32 {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys with their counts, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u32)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Keys sorted by count descending (ties keep first-seen order), at most
    /// `limit` of them.
    pub fn ranked(&self, limit: usize) -> Vec<(K, u32)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    pub fn to_btree_map(&self) -> BTreeMap<K, u32>
    where
        K: Ord,
    {
        self.entries.iter().cloned().collect()
    }
}

impl<K: Eq + Hash + Clone> Default for Tally<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> Extend<K> for Tally<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}
