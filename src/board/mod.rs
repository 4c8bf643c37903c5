mod piece;
mod square;

use std::fmt;

pub use piece::{Color, Piece, PieceType};
pub use square::{Square, SquareParseError};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// An 8×8 grid of optional pieces.
///
/// Pure data: no rule logic lives here. The board is `Copy`, so a scratch
/// position for legality checks is a plain 64-slot copy.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// The standard initial position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            let home = color.home_row();
            let pawn_row = color.pawn_start_row();
            let pawn = Piece::new(color, PieceType::Pawn);
            for (column, kind) in (1..=8).zip(BACK_RANK) {
                board.set_piece(Square::at(home, column), Some(Piece::new(color, kind)));
                board.set_piece(Square::at(pawn_row, column), Some(pawn));
            }
        }
        board
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Overwrite exactly one slot.
    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// All occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Occupied squares holding a piece of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Square of the king of `color`.
    ///
    /// Always `Some` on boards owned by a `GameState`.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceType::King)
            .map(|(square, _)| square)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// One line per row, row 8 first, `.` for empty squares.
impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = (1..=8)
            .rev()
            .map(|row| {
                (1..=8)
                    .map(|column| Square::at(row, column))
                    .map(|square| self.piece_at(square).map_or('.', Piece::char))
                    .collect::<String>()
            })
            .collect();
        f.debug_struct("Board").field("rows", &rows).finish()
    }
}
