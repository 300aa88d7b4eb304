//! Cache that forgets everything at once when it is full.

use std::collections::HashMap;

use crate::chess::zobrist::{Key, KeyPair};
use crate::search::transposition::{checked_max_size, TranspositionCache};

/// Bounded cache without per-entry bookkeeping: when the number of stored
/// entries reaches the maximum size, the next [`FlushCache::add`] empties the
/// whole cache before inserting.
///
/// The check happens before every insertion, including the ones overwriting an
/// existing fingerprint.
///
/// ```
/// use pabi_hash::chess::zobrist::KeyPair;
/// use pabi_hash::search::flush::FlushCache;
///
/// let mut cache = FlushCache::new(2).unwrap();
/// cache.add(KeyPair::new(1, 1), 'a');
/// cache.add(KeyPair::new(2, 2), 'b');
/// cache.add(KeyPair::new(3, 3), 'c');
/// assert_eq!(cache.size(), 1);
/// assert_eq!(cache.get(KeyPair::new(1, 1)), None);
/// assert_eq!(cache.get(KeyPair::new(3, 3)), Some(&'c'));
/// ```
pub struct FlushCache<V> {
    slots: HashMap<Key, HashMap<Key, V>>,
    count: usize,
    max_size: usize,
}

impl<V> FlushCache<V> {
    /// Creates an empty cache holding at most `max_size` entries.
    ///
    /// # Errors
    ///
    /// If `max_size` is zero.
    pub fn new(max_size: usize) -> anyhow::Result<Self> {
        Ok(Self {
            slots: HashMap::new(),
            count: 0,
            max_size: checked_max_size(max_size)?,
        })
    }

    /// Returns the entry stored under the fingerprint, if any. Lookups do not
    /// change the cache.
    #[must_use]
    pub fn get(&self, fingerprint: KeyPair) -> Option<&V> {
        self.slots
            .get(&fingerprint.low)
            .and_then(|slot| slot.get(&fingerprint.high))
    }

    /// Stores the entry, flushing the cache first if it is full.
    pub fn add(&mut self, fingerprint: KeyPair, entry: V) {
        if self.count == self.max_size {
            tracing::debug!(entries = self.count, "flushing full cache");
            self.clear();
        }
        let previous = self
            .slots
            .entry(fingerprint.low)
            .or_default()
            .insert(fingerprint.high, entry);
        if previous.is_none() {
            self.count += 1;
        }
    }

    /// Number of stored entries.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.count
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    #[allow(missing_docs)]
    pub fn clear(&mut self) {
        self.slots.clear();
        self.count = 0;
    }
}

impl<V> TranspositionCache<V> for FlushCache<V> {
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
