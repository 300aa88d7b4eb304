//! Position fingerprinting and bounded caches for chess search. For more
//! information, see [README].
//!
//! [`chess::zobrist::ZobristTable`] turns a [`chess::position::Position`] into
//! a pair of 32-bit keys and [`search::transposition`] memoizes search results
//! under these keys.
//!
//! [README]: https://github.com/kirillbobyrev/pabi/blob/main/README.md

pub mod chess;
pub mod evaluation;
pub mod search;
