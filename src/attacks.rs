//! Attack detection on top of the move generator.

use crate::board::{Board, Color, Piece, PieceType, Square};
use crate::movegen::{pawn_attacks, piece_moves};

/// True iff `target` is attacked by any piece of `by`.
///
/// Pawns attack their two forward diagonals whoever stands there, so a
/// square guarded by a pawn of `by` counts even when `by` occupies it. Every
/// other piece attacks exactly the destinations it could move to, which
/// never include squares held by its own side.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| attacks_square(board, from, piece, target))
}

/// Squares of the `by` pieces attacking `target`, a1 first.
pub fn attackers(board: &Board, target: Square, by: Color) -> Vec<Square> {
    board
        .pieces_of(by)
        .filter(|&(from, piece)| attacks_square(board, from, piece, target))
        .map(|(from, _)| from)
        .collect()
}

fn attacks_square(board: &Board, from: Square, piece: Piece, target: Square) -> bool {
    match piece.kind {
        PieceType::Pawn => pawn_attacks(from, piece.color).any(|to| to == target),
        _ => piece_moves(board, from, None)
            .iter()
            .any(|mv| mv.end == target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square is invalid")
    }

    fn board_with(pieces: &[(&str, char)]) -> Board {
        let mut board = Board::empty();
        for &(square, letter) in pieces {
            board.set_piece(sq(square), Piece::from_char(letter));
        }
        board
    }

    #[test_case("d5", true; "diagonal empty")]
    #[test_case("f5", true; "other diagonal")]
    #[test_case("e5", false; "straight ahead")]
    #[test_case("d3", false; "behind")]
    fn test_pawn_attacks_diagonally_only(target: &str, expected: bool) {
        let board = board_with(&[("e4", 'P')]);
        assert_eq!(is_attacked(&board, sq(target), Color::White), expected);
    }

    #[test]
    fn test_black_pawn_attacks_downwards() {
        let board = board_with(&[("e5", 'p')]);
        assert!(is_attacked(&board, sq("d4"), Color::Black));
        assert!(!is_attacked(&board, sq("d6"), Color::Black));
    }

    #[test]
    fn test_pawn_guards_square_held_by_own_piece() {
        let board = board_with(&[("e4", 'P'), ("d5", 'N')]);

        assert!(is_attacked(&board, sq("d5"), Color::White));
        assert_eq!(attackers(&board, sq("d5"), Color::White), vec![sq("e4")]);
    }

    #[test]
    fn test_piece_never_attacks_own_square() {
        let board = board_with(&[("d4", 'R'), ("d6", 'B')]);
        assert!(!is_attacked(&board, sq("d6"), Color::White));
    }

    #[test]
    fn test_slider_blocked_by_any_piece() {
        let board = board_with(&[("a1", 'r'), ("a4", 'P'), ("h8", 'b'), ("e5", 'p')]);

        assert!(is_attacked(&board, sq("a4"), Color::Black));
        assert!(!is_attacked(&board, sq("a5"), Color::Black));
        assert!(is_attacked(&board, sq("f6"), Color::Black));
        assert!(!is_attacked(&board, sq("c3"), Color::Black));
    }

    #[test]
    fn test_attacks_by_color() {
        let board = board_with(&[("g1", 'N')]);
        assert!(is_attacked(&board, sq("f3"), Color::White));
        assert!(!is_attacked(&board, sq("f3"), Color::Black));
    }

    #[test]
    fn test_king_attacks_neighbours() {
        let board = board_with(&[("e8", 'k')]);
        assert!(is_attacked(&board, sq("d7"), Color::Black));
        assert!(!is_attacked(&board, sq("e6"), Color::Black));
    }

    #[test]
    fn test_attackers_lists_every_checker() {
        // Black king on e8 attacked by a rook on the file and a knight.
        let board = board_with(&[("e8", 'k'), ("e1", 'R'), ("d6", 'N'), ("a8", 'B')]);

        assert_eq!(
            attackers(&board, sq("e8"), Color::White),
            vec![sq("e1"), sq("d6")]
        );
    }

    #[test]
    fn test_starting_position_middle_is_quiet() {
        let board = Board::standard();
        for row in 4..=5 {
            for column in 1..=8 {
                let square = Square::new(row, column).unwrap();
                assert!(!is_attacked(&board, square, Color::White));
                assert!(!is_attacked(&board, square, Color::Black));
            }
        }
        assert!(is_attacked(&board, sq("e3"), Color::White));
        assert!(is_attacked(&board, sq("f6"), Color::Black));
    }
}
