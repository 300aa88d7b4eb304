//! Bounded memoization of search results keyed by [`KeyPair`] fingerprints.
//!
//! [`transposition::TranspositionCache`] is the interface the search talks
//! to, [`recency`] and [`flush`] are its eviction policies.
//!
//! [`KeyPair`]: crate::chess::zobrist::KeyPair

pub mod flush;
pub mod recency;
pub mod transposition;
