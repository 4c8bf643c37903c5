//! Chess rules engine: board state, legal move generation, check detection
//! and game-status classification for standard chess.
//!
//! The entry point is [`GameState`]: ask it for [`GameState::legal_moves`]
//! of a square, feed one back through [`GameState::apply_move`], and read
//! the resulting [`GameStatus`].
//!
//! ```
//! use chess_rules::{GameState, GameStatus, Move};
//!
//! let mut game = GameState::new();
//! for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     let mv = Move::new(from.parse().unwrap(), to.parse().unwrap());
//!     game.apply_move(mv).unwrap();
//! }
//! assert_eq!(game.status(), GameStatus::Checkmate);
//! ```

pub mod attacks;
pub mod board;
pub mod error;
pub mod game_logic;
pub mod movegen;

pub use board::{Board, Color, Piece, PieceType, Square, SquareParseError};
pub use error::ChessError;
pub use game_logic::{CastlingRights, CastlingSide, GameState, GameStatus};
pub use movegen::{Move, piece_moves};
