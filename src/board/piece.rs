use std::ops::Not;

/// Side of a piece or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn push.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row from which pawns may advance two squares.
    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }

    /// Row holding the king and rooks in the initial position.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }

    /// Far rank, where pawns of this color promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        self.opponent().home_row()
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

/// Kind of a chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceType {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    /// Piece types a pawn may promote to, in generation order.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    /// Lowercase letter used for this piece type (`k`, `q`, `b`, `n`, `r`, `p`).
    pub const fn char(self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Rook => 'r',
            PieceType::Pawn => 'p',
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceType::King),
            'q' => Some(PieceType::Queen),
            'b' => Some(PieceType::Bishop),
            'n' => Some(PieceType::Knight),
            'r' => Some(PieceType::Rook),
            'p' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/// A piece of a given color and type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceType) -> Self {
        Self { color, kind }
    }

    /// Letter for this piece: uppercase for white, lowercase for black.
    pub const fn char(self) -> char {
        let c = self.kind.char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Inverse of [`Piece::char`].
    pub const fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match PieceType::from_char(c) {
            Some(kind) => Some(Self::new(color, kind)),
            None => None,
        }
    }
}
