//! Evaluation results that the search stores in
//! [`crate::search::transposition`] caches.
//!
//! For convenience, the score is stored in centipawn units.

use std::fmt::Display;
use std::ops::Neg;

/// A thin wrapper around i32, same size and ergonomics for performance
/// reasons. A zero score is a regular value: absence of a cached evaluation is
/// expressed with [`Option`] at the lookup site.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score {
    /// Evaluation relative value in centipawn (100 CP = 1 "pawn") units.
    value: i32,
}

impl Score {
    #[allow(missing_docs)]
    pub const DRAW: Self = Self { value: 0 };
    #[allow(missing_docs)]
    pub const LOSE: Self = Self { value: -32_000 };
    #[allow(missing_docs)]
    pub const MAX: Self = Self::WIN;
    #[allow(missing_docs)]
    pub const MIN: Self = Self::LOSE;
    #[allow(missing_docs)]
    pub const WIN: Self = Self { value: 32_000 };

    /// Returns the score in centipawns.
    #[must_use]
    pub const fn centipawns(self) -> i32 {
        self.value
    }
}

impl Neg for Score {
    type Output = Self;

    /// Mirrors evaluation to other player's perspective.
    fn neg(self) -> Self::Output {
        Self {
            value: self.value.neg(),
        }
    }
}

impl From<i32> for Score {
    fn from(value: i32) -> Self {
        Self { value }
    }
}

impl Display for Score {
    /// Formats the score as centipawn units for UCI interface.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cp {}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cp() {
        let cp = Score::from(42);
        assert_eq!(cp, Score { value: 42 });
        assert_eq!(cp.centipawns(), 42);

        assert!(Score::from(42) < Score::from(43));
        assert!(Score::DRAW > Score::from(-42));
        assert!(Score::MIN < Score::DRAW && Score::DRAW < Score::MAX);
    }

    #[test]
    fn neg() {
        assert_eq!(-Score::from(42), Score { value: -42 });
        assert_eq!(-Score::WIN, Score::LOSE);
        assert_eq!(-Score::DRAW, Score::DRAW);
    }

    #[test]
    fn display() {
        assert_eq!(Score::from(123).to_string(), "cp 123");
        assert_eq!(Score::from(-7).to_string(), "cp -7");
    }
}
