//! Chess primitives, the position view and its Zobrist fingerprints.

pub mod core;
pub mod position;
pub mod zobrist;
