use pabi_hash::chess::core::{CastleRights, File, Piece, PieceKind, Player, Square};
use pabi_hash::chess::position::Position;
use pretty_assertions::assert_eq;

/// Drops halfmove clock and fullmove counter: positions are printed in the
/// EPD form.
fn sanitize_fen(input: &str) -> String {
    input.trim().split(' ').take(4).collect::<Vec<_>>().join(" ")
}

fn legal_position(input: &str) -> Position {
    let position = Position::try_from(input)
        .unwrap_or_else(|_| panic!("we are parsing valid position: {input}"));
    assert_eq!(position.to_string(), sanitize_fen(input));
    assert_eq!(Position::try_from(position.to_string().as_str()).unwrap(), position);
    position
}

#[test]
#[allow(unused_results)]
fn basic_positions() {
    // Full FEN.
    legal_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    legal_position("2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4 w - - 0 34");
    legal_position("rnbqk1nr/p3bppp/1p2p3/2ppP3/3P4/P7/1PP1NPPP/R1BQKBNR w KQkq c6 0 7");
    legal_position("r2qkb1r/1pp1pp1p/p1np1np1/1B6/3PP1b1/2N1BN2/PPP2PPP/R2QK2R w KQkq - 0 7");
    legal_position("r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2 w q - 0 24");
    legal_position("r1b1qrk1/ppp2pbp/n2p1np1/4p1B1/2PPP3/2NB1N1P/PP3PP1/R2QK2R w KQ e6 0 9");
    legal_position("8/8/8/8/2P5/3k4/8/KB6 b - c3 0 1");
    legal_position("rnbq1rk1/pp4pp/1b1ppn2/2p2p2/2PP4/1P2PN2/PB2BPPP/RN1Q1RK1 w - c6 0 9");
    // Trimmed FEN.
    legal_position("rnbqkb1r/pp2pppp/3p1n2/8/3NP3/2N5/PPP2PPP/R1BQKB1R b KQkq -");
    // Positions that are not reachable in a game still have fingerprints.
    legal_position("8/8/8/8/8/8/8/8 w - -");
    legal_position("PPPPPPPP/8/8/8/8/8/8/pppppppp b Kq - 3 40");
}

#[test]
fn features() {
    let position = legal_position("r3k2r/8/8/3Pp3/8/8/8/R3K2R w Qk e6 0 1");
    assert_eq!(position.side_to_move(), Player::White);
    assert_eq!(
        position.castling(),
        CastleRights::WHITE_LONG | CastleRights::BLACK_SHORT
    );
    assert_eq!(position.en_passant(), Some(File::E));
    assert_eq!(
        position.at(Square::D5),
        Some(Piece::new(Player::White, PieceKind::Pawn))
    );
    assert_eq!(
        position.at(Square::H8),
        Some(Piece::new(Player::Black, PieceKind::Rook))
    );
    assert_eq!(position.pieces().count(), 8);
}

#[test]
fn counters_do_not_matter() {
    assert_eq!(
        Position::try_from("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap(),
        Position::try_from("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 17 42").unwrap()
    );
}

#[test]
#[should_panic(expected = "expected en passant square to be on rank 3, got 4")]
fn wrong_en_passant_rank() {
    let _ = Position::try_from("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq e4 0 1")
        .unwrap();
}

#[test]
fn malformed() {
    // Missing parts.
    assert!(Position::try_from("").is_err());
    assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
    assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").is_err());
    assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq").is_err());
    // Only one of the counters.
    assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0").is_err());
    // Unknown symbols.
    assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq -").is_err());
    assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq -").is_err());
    assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx -").is_err());
    assert!(Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq i6").is_err());
    // Wrong board dimensions.
    assert!(Position::try_from("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
    assert!(Position::try_from("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
    // Trailing symbols.
    assert!(
        Position::try_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 e4").is_err()
    );
}
