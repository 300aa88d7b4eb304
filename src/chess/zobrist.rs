//! Implements [Zobrist hashing]: a position is identified by XOR-ing together
//! random keys of all its features (pieces on squares, side to move, castling
//! rights and en passant file).
//!
//! Each feature gets a pair of independent 32-bit keys rather than a single
//! wide key. The halves are never combined arithmetically: caches in
//! [`crate::search`] use [`KeyPair::low`] as the outer index and
//! [`KeyPair::high`] as the inner one.
//!
//! [Zobrist hashing]: https://www.chessprogramming.org/Zobrist_Hashing

use std::fmt;
use std::ops::{BitXor, BitXorAssign};

use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::chess::core::{
    CastleRights,
    Piece,
    PieceKind,
    Player,
    Square,
    BOARD_SIZE,
    BOARD_WIDTH,
};
use crate::chess::position::Position;

/// Half of a Zobrist key.
pub type Key = i32;

/// Two independent halves of a feature key or a position fingerprint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyPair {
    #[allow(missing_docs)]
    pub low: Key,
    #[allow(missing_docs)]
    pub high: Key,
}

impl KeyPair {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(low: Key, high: Key) -> Self {
        Self { low, high }
    }
}

impl BitXor for KeyPair {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self {
            low: self.low ^ rhs.low,
            high: self.high ^ rhs.high,
        }
    }
}

impl BitXorAssign for KeyPair {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl fmt::Display for KeyPair {
    /// Prints both halves as zero-padded hexadecimal numbers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}:{:08x}", self.low, self.high)
    }
}

/// Deterministic source of Zobrist keys.
///
/// The seed is fixed: every run of the same build produces the same key table,
/// which makes search behavior and recorded fingerprints reproducible.
pub struct KeyGenerator {
    rng: Xoshiro256PlusPlus,
}

impl KeyGenerator {
    /// Seed of every generator.
    pub const SEED: u64 = 0x9E37_79B9_7F4A_7C15;

    #[must_use]
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(Self::SEED),
        }
    }

    /// Draws the next key.
    pub fn next_key(&mut self) -> Key {
        self.rng.sample(Standard)
    }

    fn next_pair(&mut self) -> KeyPair {
        let low = self.next_key();
        let high = self.next_key();
        KeyPair { low, high }
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

const PLAYERS: usize = Player::ALL.len();
const PIECE_KINDS: usize = PieceKind::ALL.len();
const CASTLE_RIGHTS: usize = CastleRights::EACH.len();

/// Immutable table of feature keys. Build it once and share it by reference
/// with everything that needs fingerprints.
///
/// ```
/// use pabi_hash::chess::position::Position;
/// use pabi_hash::chess::zobrist::ZobristTable;
///
/// let table = ZobristTable::new();
/// let fingerprint = table.fingerprint(&Position::starting());
/// assert_eq!(fingerprint, ZobristTable::new().fingerprint(&Position::starting()));
/// ```
pub struct ZobristTable {
    pieces: [[[KeyPair; BOARD_SIZE as usize]; PIECE_KINDS]; PLAYERS],
    side_to_move: [KeyPair; PLAYERS],
    castling: [KeyPair; CASTLE_RIGHTS],
    en_passant: [KeyPair; BOARD_WIDTH as usize],
}

impl ZobristTable {
    /// Draws all keys from a freshly seeded [`KeyGenerator`].
    #[must_use]
    pub fn new() -> Self {
        tracing::debug!(seed = KeyGenerator::SEED, "building Zobrist key table");
        Self::from_generator(&mut KeyGenerator::new())
    }

    /// Draws all keys from `generator`. The order is fixed: pieces (White
    /// before Black, kinds in [`PieceKind::ALL`] order, squares from A1 to H8),
    /// side to move (White, then Black), castling rights in
    /// [`CastleRights::EACH`] order and en passant files from A to H.
    #[must_use]
    pub fn from_generator(generator: &mut KeyGenerator) -> Self {
        let mut table = Self {
            pieces: [[[KeyPair::default(); BOARD_SIZE as usize]; PIECE_KINDS]; PLAYERS],
            side_to_move: [KeyPair::default(); PLAYERS],
            castling: [KeyPair::default(); CASTLE_RIGHTS],
            en_passant: [KeyPair::default(); BOARD_WIDTH as usize],
        };
        for kinds in &mut table.pieces {
            for squares in kinds.iter_mut() {
                squares.fill_with(|| generator.next_pair());
            }
        }
        table.side_to_move.fill_with(|| generator.next_pair());
        table.castling.fill_with(|| generator.next_pair());
        table.en_passant.fill_with(|| generator.next_pair());
        table
    }

    /// Key of `piece` standing on `square`.
    #[must_use]
    pub const fn piece(&self, piece: Piece, square: Square) -> KeyPair {
        self.pieces[piece.owner as usize][piece.kind as usize][square.index()]
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn side_to_move(&self, player: Player) -> KeyPair {
        self.side_to_move[player as usize]
    }

    /// Key of a single castling right.
    ///
    /// # Panics
    ///
    /// If `right` is not one of [`CastleRights::EACH`].
    #[must_use]
    pub fn castling(&self, right: CastleRights) -> KeyPair {
        let index = CastleRights::EACH
            .iter()
            .position(|candidate| *candidate == right);
        match index {
            Some(index) => self.castling[index],
            None => panic!("expected a single castling right, got {right}"),
        }
    }

    /// Key of the en passant file. Out of range values wrap around the board
    /// width.
    #[must_use]
    pub const fn en_passant(&self, file: u8) -> KeyPair {
        self.en_passant[(file % BOARD_WIDTH) as usize]
    }

    /// Computes the fingerprint of the position from scratch.
    ///
    /// The result depends only on the features of the position: equal
    /// positions always produce equal fingerprints, regardless of the moves
    /// that led to them.
    #[must_use]
    pub fn fingerprint(&self, position: &Position) -> KeyPair {
        let mut result = KeyPair::default();
        result ^= self.side_to_move(position.side_to_move());
        for (square, piece) in position.pieces() {
            result ^= self.piece(piece, square);
        }
        let castling = position.castling();
        for (index, right) in CastleRights::EACH.iter().enumerate() {
            if castling.contains(*right) {
                result ^= self.castling[index];
            }
        }
        if let Some(file) = position.en_passant() {
            result ^= self.en_passant(file as u8);
        }
        result
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
