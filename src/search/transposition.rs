//! Implements the [Transposition Table] interface: memoization of search
//! results keyed by position fingerprints.
//!
//! Two bounded implementations are available and can be chosen through
//! [`CacheConfig`]:
//!
//! - [`RecencyCache`] evicts the least recently used group of entries sharing
//!   [`KeyPair::low`].
//! - [`FlushCache`] drops everything at once when it is full.
//!
//! [Transposition Table]: https://www.chessprogramming.org/Transposition_Table

use std::fmt;

use anyhow::{bail, Context};

use crate::chess::core::Move;
use crate::chess::zobrist::KeyPair;
use crate::evaluation::Score;
use crate::search::flush::FlushCache;
use crate::search::recency::RecencyCache;

/// Result of the search stored for a position. Caches never look inside
/// entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// Best move found in the position.
    Move(Move),
    /// Evaluation of the position.
    Score(Score),
}

impl From<Move> for Entry {
    fn from(best_move: Move) -> Self {
        Self::Move(best_move)
    }
}

impl From<Score> for Entry {
    fn from(score: Score) -> Self {
        Self::Score(score)
    }
}

/// Bounded fingerprint-to-entry storage. The search holds exactly one instance
/// and both reads and writes it: there is no synchronization and `get`
/// followed by `add` is not atomic.
pub trait TranspositionCache<V> {
    /// Returns the entry stored under the fingerprint, if any. Lookups may
    /// update bookkeeping such as recency, hence `&mut self`.
    fn get(&mut self, fingerprint: KeyPair) -> Option<&V>;

    /// Stores the entry, overwriting the one with the same fingerprint.
    /// May evict other entries to stay within [`TranspositionCache::max_size`].
    fn add(&mut self, fingerprint: KeyPair, entry: V);

    /// Number of stored units. What a unit is depends on the eviction policy.
    fn size(&self) -> usize;

    /// Upper bound of [`TranspositionCache::size`].
    fn max_size(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Eviction policy of the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// [`RecencyCache`].
    Recency,
    /// [`FlushCache`].
    Flush,
}

impl TryFrom<&str> for Strategy {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "recency" | "lru" => Ok(Self::Recency),
            "flush" => Ok(Self::Flush),
            _ => bail!("cache strategy should be 'recency', 'lru' or 'flush', got '{input}'"),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Recency => "recency",
            Self::Flush => "flush",
        })
    }
}

/// Selects the cache implementation and its capacity. Options mirror the UCI
/// `setoption name <name> value <value>` pairs so that the engine can forward
/// them as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    strategy: Strategy,
    max_size: usize,
}

impl CacheConfig {
    /// Name of the option selecting [`Strategy`].
    pub const POLICY_OPTION: &'static str = "HashPolicy";
    /// Name of the option selecting [`CacheConfig::max_size`].
    pub const SIZE_OPTION: &'static str = "HashSize";
    const DEFAULT_MAX_SIZE: usize = 1 << 16;

    /// # Errors
    ///
    /// If `max_size` is zero.
    pub fn new(strategy: Strategy, max_size: usize) -> anyhow::Result<Self> {
        Ok(Self {
            strategy,
            max_size: checked_max_size(max_size)?,
        })
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    /// Applies a single option. The config is left intact on errors.
    ///
    /// # Errors
    ///
    /// If the option is unknown or the value can not be parsed.
    pub fn set_option(&mut self, name: &str, value: &str) -> anyhow::Result<()> {
        match name {
            Self::POLICY_OPTION => self.strategy = Strategy::try_from(value)?,
            Self::SIZE_OPTION => {
                let max_size = value
                    .parse::<usize>()
                    .with_context(|| format!("{name} should be a positive integer, got '{value}'"))?;
                self.max_size = checked_max_size(max_size)?;
            },
            _ => bail!("unknown cache option: {name}"),
        }
        tracing::debug!(name, value, "cache option set");
        Ok(())
    }

    /// Creates an empty cache according to the config.
    ///
    /// # Errors
    ///
    /// If the cache can not be constructed with configured size.
    pub fn build<V>(&self) -> anyhow::Result<Cache<V>> {
        Ok(match self.strategy {
            Strategy::Recency => Cache::Recency(RecencyCache::new(self.max_size)?),
            Strategy::Flush => Cache::Flush(FlushCache::new(self.max_size)?),
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Recency,
            max_size: Self::DEFAULT_MAX_SIZE,
        }
    }
}

/// Rejects sizes that would produce a cache that can never hold anything.
pub(super) fn checked_max_size(max_size: usize) -> anyhow::Result<usize> {
    if max_size == 0 {
        bail!("maximum cache size should be positive, got {max_size}");
    }
    Ok(max_size)
}

/// Cache built from [`CacheConfig`]: dispatches to the selected implementation
/// without dynamic dispatch.
pub enum Cache<V> {
    #[allow(missing_docs)]
    Recency(RecencyCache<V>),
    #[allow(missing_docs)]
    Flush(FlushCache<V>),
}

impl<V> TranspositionCache<V> for Cache<V> {
    fn get(&mut self, fingerprint: KeyPair) -> Option<&V> {
        match self {
            Self::Recency(cache) => cache.get(fingerprint),
            Self::Flush(cache) => cache.get(fingerprint),
        }
    }

    fn add(&mut self, fingerprint: KeyPair, entry: V) {
        match self {
            Self::Recency(cache) => cache.add(fingerprint, entry),
            Self::Flush(cache) => cache.add(fingerprint, entry),
        }
    }

    fn size(&self) -> usize {
        match self {
            Self::Recency(cache) => cache.size(),
            Self::Flush(cache) => cache.size(),
        }
    }

    fn max_size(&self) -> usize {
        match self {
            Self::Recency(cache) => cache.max_size(),
            Self::Flush(cache) => cache.max_size(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Recency(cache) => cache.clear(),
            Self::Flush(cache) => cache.clear(),
        }
    }
}
