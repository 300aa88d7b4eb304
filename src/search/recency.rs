//! Cache with least recently used eviction of whole [`KeyPair::low`] groups.

use std::collections::hash_map;
use std::collections::{BTreeMap, HashMap};

use crate::chess::zobrist::{Key, KeyPair};
use crate::search::transposition::{checked_max_size, TranspositionCache};

/// Entries sharing [`KeyPair::low`], indexed by [`KeyPair::high`].
struct Group<V> {
    last_touched: u64,
    entries: HashMap<Key, V>,
}

/// Bounded cache evicting the least recently used group.
///
/// Recency is tracked per [`KeyPair::low`] rather than per entry: when the
/// number of groups exceeds the maximum size, the group that was not touched
/// by [`RecencyCache::get`] or [`RecencyCache::add`] for the longest time is
/// dropped with all of its entries.
///
/// ```
/// use pabi_hash::chess::zobrist::KeyPair;
/// use pabi_hash::search::recency::RecencyCache;
///
/// let mut cache = RecencyCache::new(2).unwrap();
/// cache.add(KeyPair::new(1, 1), "a");
/// cache.add(KeyPair::new(2, 1), "b");
/// assert_eq!(cache.get(KeyPair::new(1, 1)), Some(&"a"));
/// cache.add(KeyPair::new(3, 1), "c");
/// assert_eq!(cache.get(KeyPair::new(2, 1)), None);
/// assert_eq!(cache.size(), 2);
/// ```
pub struct RecencyCache<V> {
    groups: HashMap<Key, Group<V>>,
    /// Orders groups by the tick of their last touch: the first item is the
    /// eviction candidate.
    recency: BTreeMap<u64, Key>,
    tick: u64,
    max_size: usize,
}

impl<V> RecencyCache<V> {
    /// Creates an empty cache holding at most `max_size` groups.
    ///
    /// # Errors
    ///
    /// If `max_size` is zero.
    pub fn new(max_size: usize) -> anyhow::Result<Self> {
        Ok(Self {
            groups: HashMap::new(),
            recency: BTreeMap::new(),
            tick: 0,
            max_size: checked_max_size(max_size)?,
        })
    }

    /// Returns the entry stored under the fingerprint, if any.
    ///
    /// If the [`KeyPair::low`] group exists, it becomes the most recently used
    /// one even when there is no entry under [`KeyPair::high`].
    pub fn get(&mut self, fingerprint: KeyPair) -> Option<&V> {
        let group = self.groups.get_mut(&fingerprint.low)?;
        self.tick += 1;
        let _ = self.recency.remove(&group.last_touched);
        let _ = self.recency.insert(self.tick, fingerprint.low);
        group.last_touched = self.tick;
        group.entries.get(&fingerprint.high)
    }

    /// Stores the entry and makes its group the most recently used one. If a
    /// new group does not fit, the least recently used group is evicted.
    pub fn add(&mut self, fingerprint: KeyPair, entry: V) {
        self.tick += 1;
        match self.groups.entry(fingerprint.low) {
            hash_map::Entry::Occupied(mut occupied) => {
                let group = occupied.get_mut();
                let _ = self.recency.remove(&group.last_touched);
                group.last_touched = self.tick;
                let _ = group.entries.insert(fingerprint.high, entry);
            },
            hash_map::Entry::Vacant(vacant) => {
                let _ = vacant.insert(Group {
                    last_touched: self.tick,
                    entries: HashMap::from([(fingerprint.high, entry)]),
                });
            },
        }
        let _ = self.recency.insert(self.tick, fingerprint.low);
        if self.groups.len() > self.max_size {
            self.evict();
        }
    }

    fn evict(&mut self) {
        if let Some((_, low)) = self.recency.pop_first() {
            if let Some(group) = self.groups.remove(&low) {
                tracing::trace!(low, entries = group.entries.len(), "evicted cache group");
            }
        }
    }

    /// Number of distinct [`KeyPair::low`] groups, not individual entries.
    #[must_use]
    pub fn size(&self) -> usize {
        self.groups.len()
    }

    /// Maximum number of groups.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    /// Drops all groups.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.recency.clear();
    }
}

impl<V> TranspositionCache<V> for RecencyCache<V> {
    fn get(&mut self, fingerprint: KeyPair) -> Option<&V> {
        Self::get(self, fingerprint)
    }

    fn add(&mut self, fingerprint: KeyPair, entry: V) {
        Self::add(self, fingerprint, entry);
    }

    fn size(&self) -> usize {
        Self::size(self)
    }

    fn max_size(&self) -> usize {
        Self::max_size(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }
}
