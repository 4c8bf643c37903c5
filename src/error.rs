use thiserror::Error;

use crate::movegen::Move;

/// Errors reported synchronously by the rules engine.
///
/// None of these are fatal: callers are expected to re-prompt for a
/// valid square or a legal move.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ChessError {
    /// Row or column outside 1..=8.
    #[error("square (row {row}, column {column}) is off the board")]
    InvalidSquare { row: u8, column: u8 },

    /// The move is not among the legal moves of the side to move.
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// A set-up position breaks one of the board invariants.
    #[error("invalid position: {0}")]
    InvalidPosition(&'static str),
}
