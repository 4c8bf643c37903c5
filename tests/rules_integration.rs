use chess_rules::{
    Board, CastlingRights, ChessError, Color, GameState, GameStatus, Move, Piece, PieceType, Square,
};

/// Helper: parse a square name.
fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

/// Helper: parse a coordinate move like "e2e4" or "a7a8q".
fn mv(text: &str) -> Move {
    let start = sq(&text[0..2]);
    let end = sq(&text[2..4]);
    match text.chars().nth(4).and_then(PieceType::from_char) {
        Some(kind) => Move::promoting(start, end, kind),
        None => Move::new(start, end),
    }
}

/// Helper: play a sequence of moves, returning the status after the last one.
fn play(game: &mut GameState, moves: &str) -> GameStatus {
    let mut status = game.status();
    for text in moves.split_whitespace() {
        status = game
            .apply_move(mv(text))
            .unwrap_or_else(|err| panic!("{text} should be legal: {err}"));
    }
    status
}

/// Helper: build a game from `(square, piece letter)` pairs.
fn setup(pieces: &[(&str, char)], side_to_move: Color) -> GameState {
    let mut board = Board::empty();
    for &(square, letter) in pieces {
        board.set_piece(sq(square), Piece::from_char(letter));
    }
    GameState::from_parts(board, side_to_move, CastlingRights::NONE, None, 0, 1)
        .expect("valid position")
}

// ---------------------------------------------------------------
// Starting position
// ---------------------------------------------------------------

#[test]
fn starting_position_has_twenty_moves() {
    let game = GameState::new();

    let total: usize = Square::all().map(|s| game.legal_moves(s).len()).sum();
    assert_eq!(total, 20);
    assert_eq!(game.all_legal_moves().len(), 20);
    assert_eq!(game.status(), GameStatus::Ongoing);
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn starting_moves_split_into_pawns_and_knights() {
    let game = GameState::new();

    let (pawn, knight): (Vec<Move>, Vec<Move>) = game
        .all_legal_moves()
        .into_iter()
        .partition(|m| game.piece_at(m.start).map(|p| p.kind) == Some(PieceType::Pawn));
    assert_eq!(pawn.len(), 16);
    assert_eq!(knight.len(), 4);
}

// ---------------------------------------------------------------
// Terminal states
// ---------------------------------------------------------------

#[test]
fn fools_mate_is_checkmate_for_white() {
    let mut game = GameState::new();

    let status = play(&mut game, "f2f3 e7e5 g2g4 d8h4");

    assert_eq!(status, GameStatus::Checkmate);
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn scholars_mate_is_checkmate_for_black() {
    let mut game = GameState::new();

    let status = play(&mut game, "e2e4 e7e5 f1c4 b8c6 d1h5 g8f6 h5f7");

    assert_eq!(status, GameStatus::Checkmate);
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.checkers(), vec![sq("f7")]);
}

#[test]
fn lone_king_without_moves_is_stalemate() {
    let game = setup(&[("h8", 'k'), ("f7", 'Q'), ("g6", 'K')], Color::Black);

    assert_eq!(game.status(), GameStatus::Stalemate);
    assert!(game.all_legal_moves().is_empty());
}

#[test]
fn stalemate_reached_by_a_move() {
    let mut game = setup(&[("h8", 'k'), ("e7", 'Q'), ("g6", 'K')], Color::White);

    assert_eq!(game.apply_move(mv("e7f7")), Ok(GameStatus::Stalemate));
}

// ---------------------------------------------------------------
// King safety
// ---------------------------------------------------------------

#[test]
fn legal_moves_never_leave_own_king_attacked() {
    let mut game = GameState::new();
    play(&mut game, "e2e4 e7e5 d1h5 b8c6 f1c4 g8f6");

    for candidate in game.all_legal_moves() {
        let mut after = game.clone();
        after.apply_move(candidate).expect("listed moves are legal");

        let king = after
            .board()
            .king_square(Color::White)
            .expect("white king present");
        assert!(
            !chess_rules::attacks::is_attacked(after.board(), king, Color::Black),
            "{candidate} leaves the white king attacked"
        );
    }
}

#[test]
fn check_must_be_answered() {
    let mut game = GameState::new();
    let status = play(&mut game, "e2e4 d7d6 f1b5");

    assert_eq!(status, GameStatus::Check);
    assert!(game.is_check());
    let moves = game.all_legal_moves();
    assert!(moves.contains(&mv("c7c6")));
    assert!(moves.contains(&mv("b8d7")));
    assert!(!moves.contains(&mv("a7a6")));
    assert_eq!(
        game.apply_move(mv("a7a6")),
        Err(ChessError::IllegalMove(mv("a7a6")))
    );
}

// ---------------------------------------------------------------
// En passant
// ---------------------------------------------------------------

#[test]
fn en_passant_available_only_immediately() {
    let mut game = GameState::new();
    play(&mut game, "e2e4 g8f6 e4e5 d7d5");

    assert!(game.legal_moves(sq("e5")).contains(&mv("e5d6")));

    let mut taken = game.clone();
    assert_eq!(taken.apply_move(mv("e5d6")), Ok(GameStatus::Ongoing));
    assert_eq!(
        taken.piece_at(sq("d6")),
        Some(Piece::new(Color::White, PieceType::Pawn))
    );
    assert_eq!(taken.piece_at(sq("d5")), None, "captured pawn removed");

    play(&mut game, "b1c3 b8c6");
    assert!(!game.legal_moves(sq("e5")).contains(&mv("e5d6")));
}

#[test]
fn black_captures_en_passant() {
    let mut game = GameState::new();
    play(&mut game, "a2a3 d7d5 a3a4 d5d4 e2e4");

    assert_eq!(game.en_passant_target(), Some(sq("e3")));
    play(&mut game, "d4e3");
    assert_eq!(game.piece_at(sq("e4")), None);
    assert_eq!(
        game.piece_at(sq("e3")),
        Some(Piece::new(Color::Black, PieceType::Pawn))
    );
}

// ---------------------------------------------------------------
// Castling
// ---------------------------------------------------------------

#[test]
fn castling_never_offered_after_king_moved() {
    let mut game = GameState::new();
    play(&mut game, "e2e4 e7e5 g1f3 g8f6 f1e2 f8e7");
    assert!(game.legal_moves(sq("e1")).contains(&mv("e1g1")));

    play(&mut game, "e1f1 b8c6 f1e1 c6b8");
    assert!(!game.legal_moves(sq("e1")).contains(&mv("e1g1")));

    // Black never moved king or rook and keeps the right.
    play(&mut game, "a2a3");
    assert!(game.legal_moves(sq("e8")).contains(&mv("e8g8")));
}

#[test]
fn castling_moves_both_pieces() {
    let mut game = GameState::new();
    play(&mut game, "d2d4 d7d5 b1c3 b8c6 c1f4 c8f5 d1d2 d8d7");

    play(&mut game, "e1c1 e8c8");

    for (square, letter) in [("c1", 'K'), ("d1", 'R'), ("c8", 'k'), ("d8", 'r')] {
        assert_eq!(
            game.piece_at(sq(square)),
            Piece::from_char(letter),
            "{square}"
        );
    }
    for square in ["a1", "e1", "a8", "e8"] {
        assert_eq!(game.piece_at(sq(square)), None, "{square}");
    }
}

// ---------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------

#[test]
fn promotion_yields_four_moves_per_square() {
    let game = setup(
        &[("e1", 'K'), ("h8", 'k'), ("c7", 'P'), ("d8", 'r')],
        Color::White,
    );

    let moves = game.legal_moves(sq("c7"));
    assert_eq!(moves.len(), 8);
    assert!(moves.iter().all(|m| m.promotion.is_some()));
    assert!(!moves.contains(&Move::new(sq("c7"), sq("c8"))));
}

#[test]
fn underpromotion_applies_chosen_piece() {
    let mut game = setup(&[("e1", 'K'), ("h8", 'k'), ("c7", 'P')], Color::White);

    play(&mut game, "c7c8r");

    assert_eq!(
        game.piece_at(sq("c8")),
        Some(Piece::new(Color::White, PieceType::Rook))
    );
    assert_eq!(game.status(), GameStatus::Check);
}
