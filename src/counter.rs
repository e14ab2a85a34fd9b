//! Generic bin counters used for tie-break voting during echelon typing.
//!
//! Two flavors: `HashBinCounter` for unordered keys, `TreeBinCounter` when
//! keys have a useful order (deterministic key-order tie-breaking and
//! min/max key queries).

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Unordered bin counter over hashable keys.
#[derive(Debug, Clone, Default)]
pub struct HashBinCounter<K: Eq + Hash> {
    bins: FxHashMap<K, u64>,
}

impl<K: Eq + Hash> HashBinCounter<K> {
    pub fn new() -> Self {
        HashBinCounter {
            bins: FxHashMap::default(),
        }
    }

    pub fn bump(&mut self, bin: K) {
        self.bump_by(bin, 1);
    }

    pub fn bump_by(&mut self, bin: K, delta: u64) {
        *self.bins.entry(bin).or_insert(0) += delta;
    }

    /// Count for a bin; `None` if the bin was never bumped.
    pub fn count(&self, bin: &K) -> Option<u64> {
        self.bins.get(bin).copied()
    }

    pub fn count_or_zero(&self, bin: &K) -> u64 {
        self.count(bin).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.bins.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.bins.iter().map(|(k, v)| (k, *v))
    }

    /// Keys ordered by ascending count. Ties keep container order.
    pub fn keys_by_count_ascending(&self) -> Vec<&K> {
        let mut by_count: BTreeMap<u64, Vec<&K>> = BTreeMap::new();
        for (k, n) in self.bins.iter() {
            by_count.entry(*n).or_default().push(k);
        }
        by_count.into_values().flatten().collect()
    }

    pub fn keys_by_count_descending(&self) -> Vec<&K> {
        let mut keys = self.keys_by_count_ascending();
        keys.reverse();
        keys
    }

    /// Key with the highest count; arbitrary on a tie, `None` when empty.
    pub fn max_count_key(&self) -> Option<&K> {
        self.bins.iter().max_by_key(|(_, n)| **n).map(|(k, _)| k)
    }
}

impl<K: Eq + Hash + Clone> HashBinCounter<K> {
    /// Fold another counter's bins into this one.
    pub fn absorb(&mut self, other: &HashBinCounter<K>) {
        for (k, n) in other.bins.iter() {
            self.bump_by(k.clone(), *n);
        }
    }
}

/// Key-ordered bin counter; iteration and tie-breaking follow key order.
#[derive(Debug, Clone, Default)]
pub struct TreeBinCounter<K: Ord> {
    bins: BTreeMap<K, u64>,
}

impl<K: Ord> TreeBinCounter<K> {
    pub fn new() -> Self {
        TreeBinCounter {
            bins: BTreeMap::new(),
        }
    }

    pub fn bump(&mut self, bin: K) {
        self.bump_by(bin, 1);
    }

    pub fn bump_by(&mut self, bin: K, delta: u64) {
        *self.bins.entry(bin).or_insert(0) += delta;
    }

    pub fn count(&self, bin: &K) -> Option<u64> {
        self.bins.get(bin).copied()
    }

    pub fn count_or_zero(&self, bin: &K) -> u64 {
        self.count(bin).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.bins.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.bins.iter().map(|(k, v)| (k, *v))
    }

    /// Smallest key in key order.
    pub fn min_key(&self) -> Option<&K> {
        self.bins.keys().next()
    }

    /// Largest key in key order.
    pub fn max_key(&self) -> Option<&K> {
        self.bins.keys().next_back()
    }

    /// Keys ordered by ascending count; ties in key order.
    pub fn keys_by_count_ascending(&self) -> Vec<&K> {
        let mut by_count: BTreeMap<u64, Vec<&K>> = BTreeMap::new();
        for (k, n) in self.bins.iter() {
            by_count.entry(*n).or_default().push(k);
        }
        by_count.into_values().flatten().collect()
    }

    pub fn keys_by_count_descending(&self) -> Vec<&K> {
        let mut keys = self.keys_by_count_ascending();
        keys.reverse();
        keys
    }

    /// Key with the highest count; first such key in key order on a tie.
    pub fn max_count_key(&self) -> Option<&K> {
        self.bins
            .iter()
            .rev()
            .max_by_key(|(_, n)| **n)
            .map(|(k, _)| k)
    }
}

impl<K: Ord + Clone> TreeBinCounter<K> {
    pub fn absorb(&mut self, other: &TreeBinCounter<K>) {
        for (k, n) in other.bins.iter() {
            self.bump_by(k.clone(), *n);
        }
    }
}

impl<K: Eq + Hash> FromIterator<K> for HashBinCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut ctr = HashBinCounter::new();
        for k in iter {
            ctr.bump(k);
        }
        ctr
    }
}

impl<K: Ord> FromIterator<K> for TreeBinCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut ctr = TreeBinCounter::new();
        for k in iter {
            ctr.bump(k);
        }
        ctr
    }
}
