//! Provides the [Chess Position] view consumed by the Zobrist fingerprinting:
//! piece placement, side to move, castling rights and the en passant file.
//!
//! The view does not know anything about move generation or the game history:
//! two positions reached by different move sequences are equal as long as
//! their features are.
//!
//! [Chess Position]: https://www.chessprogramming.org/Chess_Position

use std::fmt;

use anyhow::{bail, Context};

use crate::chess::core::{
    CastleRights,
    File,
    Piece,
    PieceKind,
    Player,
    Rank,
    Square,
    BOARD_SIZE,
    BOARD_WIDTH,
};

/// Square-centric chess position with all the features that distinguish
/// positions for the purposes of search: board, side to move, castling rights
/// and en passant file. It has 1:1 relationship with the first four fields of
/// [Forsyth-Edwards Notation] (FEN).
///
/// [`Position::try_from()`] provides a convenient interface for creating a
/// [`Position`]. It will clean up the input (trim newlines and whitespace) and
/// attempt to parse in either FEN or a version of [Extended Position
/// Description] (EPD). Halfmove clock and fullmove counter are validated but
/// not stored: they do not affect the position identity.
///
/// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
/// [Extended Position Description]: https://www.chessprogramming.org/Extended_Position_Description
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [Option<Piece>; BOARD_SIZE as usize],
    side_to_move: Player,
    castling: CastleRights,
    en_passant: Option<File>,
}

impl Position {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use pabi_hash::chess::position::Position;
    ///
    /// let starting_position = Position::starting();
    /// assert_eq!(
    ///     &starting_position.to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut result = Self {
            castling: CastleRights::ALL,
            ..Self::empty()
        };
        for square in Square::iter() {
            let backrank_piece = BACKRANK[square.file() as usize];
            result.squares[square.index()] = match square.rank() {
                Rank::One => Some(Piece::new(Player::White, backrank_piece)),
                Rank::Two => Some(Piece::new(Player::White, PieceKind::Pawn)),
                Rank::Seven => Some(Piece::new(Player::Black, PieceKind::Pawn)),
                Rank::Eight => Some(Piece::new(Player::Black, backrank_piece)),
                _ => None,
            };
        }
        result
    }

    /// Creates an empty board with White to move and no castling rights.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
            side_to_move: Player::White,
            castling: CastleRights::empty(),
            en_passant: None,
        }
    }

    /// Returns the piece occupying given square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Puts a piece on the square or clears it.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// Iterates over the occupied squares from [`Square::A1`] to
    /// [`Square::H8`].
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.at(square).map(|piece| (square, piece)))
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    #[allow(missing_docs)]
    pub fn set_side_to_move(&mut self, player: Player) {
        self.side_to_move = player;
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn castling(&self) -> CastleRights {
        self.castling
    }

    #[allow(missing_docs)]
    pub fn set_castling(&mut self, castling: CastleRights) {
        self.castling = castling;
    }

    /// File of the pawn that can be captured en passant right now, if any.
    #[must_use]
    pub const fn en_passant(&self) -> Option<File> {
        self.en_passant
    }

    #[allow(missing_docs)]
    pub fn set_en_passant(&mut self, file: Option<File>) {
        self.en_passant = file;
    }

    /// Rank of the en passant target square, which is determined by the side
    /// to move.
    const fn en_passant_rank(player: Player) -> Rank {
        match player {
            Player::White => Rank::Six,
            Player::Black => Rank::Three,
        }
    }

    /// Parses board from Forsyth-Edwards Notation and checks its correctness.
    /// The parser will accept trimmed full FEN and trimmed FEN (4 first parts).
    ///
    /// FEN ::=
    ///       Piece Placement
    ///   ' ' Side to move
    ///   ' ' Castling ability
    ///   ' ' En passant target square
    ///   ' ' Halfmove clock
    ///   ' ' Fullmove counter
    ///
    /// The last two parts (together) are optional and will default to "0 1".
    /// Technically, that is not a full FEN position, but it is supported
    /// because EPD-style position strings are common in public position books
    /// and datasets where halfmove clock and fullmove counters do not matter.
    ///
    /// NOTE: This expects properly-formatted inputs: no extra symbols or
    /// additional whitespace. Use [`Position::try_from`] for cleaning up the
    /// input if it is coming from untrusted source and is likely to contain
    /// extra symbols.
    ///
    /// # Errors
    ///
    /// If any of the FEN parts is missing or malformed.
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split(' ');
        // Parse Piece Placement.
        let mut result = Self::empty();
        let Some(pieces_placement) = parts.next() else {
            bail!("incorrect FEN: missing pieces placement")
        };
        let ranks = pieces_placement.split('/');
        let mut rank_id = BOARD_WIDTH;
        for rank_fen in ranks {
            if rank_id == 0 {
                bail!("incorrect FEN: expected 8 ranks, got {pieces_placement}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        if file > BOARD_WIDTH {
                            bail!("file exceeded {BOARD_WIDTH} in {rank_fen}");
                        }
                        continue;
                    },
                    _ => (),
                }
                if file >= BOARD_WIDTH {
                    bail!("file exceeded {BOARD_WIDTH} in {rank_fen}");
                }
                let piece = Piece::try_from(symbol)?;
                result.set_piece(Square::new(file.try_into()?, rank), Some(piece));
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of length {file}"
                );
            }
        }
        if rank_id != 0 {
            bail!("incorrect FEN: there should be 8 ranks, got {pieces_placement}");
        }
        result.side_to_move = match parts.next() {
            Some(value) => value.try_into()?,
            None => bail!("incorrect FEN: missing side to move"),
        };
        result.castling = match parts.next() {
            Some(value) => value.try_into()?,
            None => bail!("incorrect FEN: missing castling rights"),
        };
        result.en_passant = match parts.next() {
            Some("-") => None,
            Some(value) => {
                let square = Square::try_from(value)?;
                let expected_rank = Self::en_passant_rank(result.side_to_move);
                if square.rank() != expected_rank {
                    bail!(
                        "expected en passant square to be on rank {expected_rank}, got {}",
                        square.rank()
                    );
                }
                Some(square.file())
            },
            None => bail!("incorrect FEN: missing en passant square"),
        };
        match parts.next() {
            Some(value) => {
                if !value.bytes().all(|c| c.is_ascii_digit()) {
                    bail!("halfmove clock can not contain anything other than digits");
                }
                let _halfmove_clock = value.parse::<u8>().with_context(|| {
                    format!("incorrect FEN: halfmove clock can not be parsed {value}")
                })?;
            },
            // This is a correct EPD: exit early.
            None => return Ok(result),
        };
        match parts.next() {
            Some(value) => {
                if !value.bytes().all(|c| c.is_ascii_digit()) {
                    bail!("fullmove counter clock can not contain anything other than digits");
                }
                let fullmove_counter = value.parse::<u16>().with_context(|| {
                    format!("incorrect FEN: fullmove counter can not be parsed {value}")
                })?;
                if fullmove_counter == 0 {
                    bail!("incorrect FEN: fullmove counter starts at 1");
                }
            },
            None => bail!("incorrect FEN: missing fullmove counter"),
        };
        match parts.next() {
            None => Ok(result),
            Some(_) => bail!("trailing symbols are not allowed in FEN"),
        }
    }

    fn write_placement(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_WIDTH).rev() {
            let mut empty_squares = 0;
            for file in 0..BOARD_WIDTH {
                match self.squares[(rank * BOARD_WIDTH + file) as usize] {
                    Some(piece) => {
                        if empty_squares != 0 {
                            write!(f, "{empty_squares}")?;
                            empty_squares = 0;
                        }
                        write!(f, "{piece}")?;
                    },
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != 0 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Strips surrounding whitespace and an optional "fen " or "epd " prefix
    /// before handing the input to [`Position::from_fen`].
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        for prefix in ["fen ", "epd "] {
            if let Some(stripped) = input.strip_prefix(prefix) {
                return Self::from_fen(stripped);
            }
        }
        Self::from_fen(input)
    }
}

impl fmt::Display for Position {
    /// Prints the position in the trimmed (EPD-style) Forsyth-Edwards
    /// Notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_placement(f)?;
        write!(f, " {} {} ", self.side_to_move, self.castling)?;
        match self.en_passant {
            Some(file) => write!(
                f,
                "{}",
                Square::new(file, Self::en_passant_rank(self.side_to_move))
            ),
            None => write!(f, "-"),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_WIDTH).rev() {
            for file in 0..BOARD_WIDTH {
                match self.squares[(rank * BOARD_WIDTH + file) as usize] {
                    Some(piece) => write!(f, "{piece}")?,
                    None => write!(f, ".")?,
                }
                if file != BOARD_WIDTH - 1 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "Player to move: {:?}", &self.side_to_move)?;
        writeln!(f, "En Passant: {:?}", &self.en_passant)?;
        // bitflags' default fmt::Debug implementation is not very convenient:
        // dump FEN instead.
        writeln!(f, "Castling rights: {}", &self.castling)?;
        writeln!(f, "FEN: {self}")?;
        Ok(())
    }
}
