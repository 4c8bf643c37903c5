//! Pseudo-legal move generation.
//!
//! Every function here is pure: given a board and a square it lists the
//! destinations the piece's movement pattern allows, without asking whether
//! the mover's own king ends up attacked. Castling is not generated here; it
//! depends on game history and lives in [`crate::game_logic`].

use std::fmt;

use crate::board::{Board, Color, PieceType, Square};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// A move from one square to another.
///
/// `promotion` is set only for pawn moves onto the far rank. Castling is
/// encoded as the king moving two columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    #[inline]
    pub const fn new(start: Square, end: Square) -> Self {
        Self {
            start,
            end,
            promotion: None,
        }
    }

    #[inline]
    pub const fn promoting(start: Square, end: Square, kind: PieceType) -> Self {
        Self {
            start,
            end,
            promotion: Some(kind),
        }
    }
}

/// Coordinate form: `e2e4`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.char())?;
        }
        Ok(())
    }
}

/// Pseudo-legal moves of the piece on `from`.
///
/// `en_passant` is the square a pawn skipped on the previous move, if any;
/// only the game knows it. An empty square yields no moves.
pub fn piece_moves(board: &Board, from: Square, en_passant: Option<Square>) -> Vec<Move> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    match piece.kind {
        PieceType::King => step_moves(board, from, piece.color, &KING_OFFSETS),
        PieceType::Queen => slide_moves(board, from, piece.color, &QUEEN_DIRECTIONS),
        PieceType::Rook => slide_moves(board, from, piece.color, &ROOK_DIRECTIONS),
        PieceType::Bishop => slide_moves(board, from, piece.color, &BISHOP_DIRECTIONS),
        PieceType::Knight => step_moves(board, from, piece.color, &KNIGHT_OFFSETS),
        PieceType::Pawn => pawn_moves(board, from, piece.color, en_passant),
    }
}

/// Squares a pawn of `color` on `from` attacks, occupied or not.
pub fn pawn_attacks(from: Square, color: Color) -> impl Iterator<Item = Square> {
    [-1, 1]
        .into_iter()
        .filter_map(move |d_column| from.offset(color.pawn_direction(), d_column))
}

/// Single jumps to each offset (king, knight).
fn step_moves(board: &Board, from: Square, color: Color, offsets: &[(i8, i8)]) -> Vec<Move> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_column)| from.offset(d_row, d_column))
        .filter(|&to| board.piece_at(to).is_none_or(|other| other.color != color))
        .map(|to| Move::new(from, to))
        .collect()
}

/// Rays that run until the board edge or the first occupied square.
fn slide_moves(board: &Board, from: Square, color: Color, directions: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(d_row, d_column) in directions {
        let mut cursor = from.offset(d_row, d_column);
        while let Some(to) = cursor {
            match board.piece_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(other) => {
                    if other.color != color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            cursor = to.offset(d_row, d_column);
        }
    }
    moves
}

fn pawn_moves(board: &Board, from: Square, color: Color, en_passant: Option<Square>) -> Vec<Move> {
    let mut moves = Vec::new();
    let forward = color.pawn_direction();

    if let Some(one) = from.offset(forward, 0)
        && board.piece_at(one).is_none()
    {
        push_pawn_move(&mut moves, from, one, color);

        if from.row() == color.pawn_start_row()
            && let Some(two) = one.offset(forward, 0)
            && board.piece_at(two).is_none()
        {
            moves.push(Move::new(from, two));
        }
    }

    for to in pawn_attacks(from, color) {
        let target = board.piece_at(to);
        let captures = target.is_some_and(|other| other.color != color);
        let en_passant_capture = target.is_none() && en_passant == Some(to);
        if captures || en_passant_capture {
            push_pawn_move(&mut moves, from, to, color);
        }
    }

    moves
}

/// Push a pawn move, fanning out into one move per promotion type on the far rank.
fn push_pawn_move(moves: &mut Vec<Move>, from: Square, to: Square, color: Color) {
    if to.row() == color.promotion_row() {
        moves.extend(
            PieceType::PROMOTIONS
                .into_iter()
                .map(|kind| Move::promoting(from, to, kind)),
        );
    } else {
        moves.push(Move::new(from, to));
    }
}
