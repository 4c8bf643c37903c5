use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::ChessError;

/// A single square on the chess board.
///
/// Addressed by 1-based row (rank) and column (file). Internally stores
/// index 0-63 where:
/// - 0 = a1, 7 = h1
/// - 56 = a8, 63 = h8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from a row and column, both in 1..=8.
    pub const fn new(row: u8, column: u8) -> Result<Self, ChessError> {
        if row >= 1 && row <= 8 && column >= 1 && column <= 8 {
            Ok(Self::at(row, column))
        } else {
            Err(ChessError::InvalidSquare { row, column })
        }
    }

    /// Unchecked constructor for coordinates already known to be on the board.
    pub(crate) const fn at(row: u8, column: u8) -> Self {
        debug_assert!(row >= 1 && row <= 8 && column >= 1 && column <= 8);
        Self((row - 1) * 8 + (column - 1))
    }

    /// Returns the internal index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the row (1-8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8 + 1
    }

    /// Returns the column (1-8).
    #[inline]
    pub const fn column(self) -> u8 {
        self.0 % 8 + 1
    }

    /// Returns the file letter ('a'-'h') of this square.
    #[inline]
    pub const fn file(self) -> char {
        (b'a' + self.0 % 8) as char
    }

    /// The square `d_row` rows and `d_column` columns away, if still on the board.
    pub const fn offset(self, d_row: i8, d_column: i8) -> Option<Self> {
        let row = self.row() as i8 + d_row;
        let column = self.column() as i8 + d_column;
        if row >= 1 && row <= 8 && column >= 1 && column <= 8 {
            Some(Self::at(row as u8, column as u8))
        } else {
            None
        }
    }

    /// All 64 squares, a1 first and h8 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

/// Parse algebraic square names like "e4".
///
/// # Examples
/// ```
/// # use chess_rules::Square;
/// let square: Square = "e4".parse().unwrap();
/// assert_eq!((square.row(), square.column()), (4, 5));
/// ```
impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError::WrongLength);
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(SquareParseError::BadFile);
        }
        let rank = rank
            .to_digit(10)
            .filter(|r| (1..=8).contains(r))
            .ok_or(SquareParseError::BadRank)?;

        Ok(Self::at(rank as u8, file as u8 - b'a' + 1))
    }
}

/// Display square in algebraic notation (e.g., "e4").
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.row())
    }
}

/// Error type for parsing square names.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SquareParseError {
    /// Square names must be exactly 2 characters
    #[error("square must be 2 characters (e.g., 'e4')")]
    WrongLength,
    /// File must be a letter from a-h
    #[error("file must be a-h")]
    BadFile,
    /// Rank must be a digit from 1-8
    #[error("rank must be 1-8")]
    BadRank,
}
