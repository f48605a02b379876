use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::Hash;

/// A map from keys to nonzero signed counts with an O(1) running total.
///
/// Entries whose count reaches zero are physically removed, so iteration
/// only ever visits keys with nonzero counts. Used by models whose value
/// domain is open-ended, where a dense count vector would be wasteful.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparseCounter<K>
where
    K: Copy + Eq + Hash,
{
    counts: HashMap<K, i64>,
    total: i64,
}

impl<K> SparseCounter<K>
where
    K: Copy + Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            total: 0,
        }
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }

    /// Bulk-load a count for a key that is not yet present.
    ///
    /// # Panics
    /// If the key is already present.
    pub fn init_count(&mut self, key: K, count: i64) {
        if count != 0 {
            let previous = self.counts.insert(key, count);
            assert!(previous.is_none(), "duplicate key in init_count");
            self.total += count;
        }
    }

    /// The count for `key`, or 0 if absent.
    #[must_use]
    pub fn get_count(&self, key: K) -> i64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// The sum of all counts, in O(1).
    #[must_use]
    pub const fn get_total(&self) -> i64 {
        self.total
    }

    /// Increment the count for `key` by one; returns the new count.
    pub fn add(&mut self, key: K) -> i64 {
        self.add_n(key, 1)
    }

    /// Add a signed `delta` to the count for `key`; returns the new count.
    ///
    /// A zero delta is a no-op and returns the current count. Entries that
    /// reach zero are removed. Callers must track multiplicities: driving
    /// a key's count negative is a caller bug and asserts in debug builds.
    pub fn add_n(&mut self, key: K, delta: i64) -> i64 {
        if delta == 0 {
            return self.get_count(key);
        }
        self.total += delta;
        match self.counts.entry(key) {
            hash_map::Entry::Occupied(mut entry) => {
                let count = entry.get_mut();
                *count += delta;
                let count = *count;
                debug_assert!(count >= 0, "count driven negative");
                if count == 0 {
                    entry.remove();
                }
                count
            }
            hash_map::Entry::Vacant(entry) => {
                debug_assert!(delta > 0, "removing a key with count 0");
                entry.insert(delta);
                delta
            }
        }
    }

    /// Decrement the count for `key` by one; returns the new count.
    pub fn remove(&mut self, key: K) -> i64 {
        self.add_n(key, -1)
    }

    /// Add every (key, count) pair of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for (&key, &count) in &other.counts {
            self.add_n(key, count);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, i64)> + '_ {
        self.counts.iter().map(|(&key, &count)| (key, count))
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.counts.keys().copied()
    }
}

impl<'a, K> IntoIterator for &'a SparseCounter<K>
where
    K: Copy + Eq + Hash,
{
    type Item = (&'a K, &'a i64);
    type IntoIter = hash_map::Iter<'a, K, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
