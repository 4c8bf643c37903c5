use crate::attacks::{attackers, is_attacked};
use crate::board::{Board, Color, Piece, PieceType, Square};
use crate::error::ChessError;
use crate::movegen::{Move, piece_moves};

const KING_HOME_COLUMN: u8 = 5;

/// Classification of the position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// King attacked, legal moves exist.
    Check,
    /// King attacked, no legal moves.
    Checkmate,
    /// King not attacked, no legal moves.
    Stalemate,
}

impl GameStatus {
    /// True for checkmate and stalemate.
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Wing a king castles towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    /// Column of the rook before castling.
    pub const fn rook_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 8,
            CastlingSide::QueenSide => 1,
        }
    }

    /// Column of the rook after castling.
    pub const fn rook_target_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 4,
        }
    }

    /// Column of the king after castling.
    pub const fn king_target_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 3,
        }
    }

    /// Columns strictly between king and rook; all must be empty.
    fn between_columns(self) -> &'static [u8] {
        match self {
            CastlingSide::KingSide => &[6, 7],
            CastlingSide::QueenSide => &[2, 3, 4],
        }
    }

    /// Columns the king starts on, crosses and lands on; none may be attacked.
    fn king_path_columns(self) -> [u8; 3] {
        match self {
            CastlingSide::KingSide => [5, 6, 7],
            CastlingSide::QueenSide => [5, 4, 3],
        }
    }

    fn of_king_move(mv: Move) -> Self {
        if mv.end.column() > mv.start.column() {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }
}

/// Per-color, per-side castling permissions.
///
/// Rights are only ever revoked during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    // Indexed by [color][side].
    allowed: [[bool; 2]; 2],
}

impl CastlingRights {
    /// All four rights, as in the initial position.
    pub const ALL: CastlingRights = CastlingRights::new(true, true, true, true);

    /// No castling for either side.
    pub const NONE: CastlingRights = CastlingRights::new(false, false, false, false);

    pub const fn new(
        white_king_side: bool,
        white_queen_side: bool,
        black_king_side: bool,
        black_queen_side: bool,
    ) -> Self {
        Self {
            allowed: [
                [white_king_side, white_queen_side],
                [black_king_side, black_queen_side],
            ],
        }
    }

    #[inline]
    pub const fn has(&self, color: Color, side: CastlingSide) -> bool {
        self.allowed[color.index()][side as usize]
    }

    fn revoke(&mut self, color: Color, side: CastlingSide) {
        self.allowed[color.index()][side as usize] = false;
    }

    fn revoke_all(&mut self, color: Color) {
        self.allowed[color.index()] = [false, false];
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// Authoritative state of one game.
///
/// Created from the standard position (or a validated set-up) and mutated
/// only through [`GameState::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A new game from the standard initial position, White to move.
    pub fn new() -> Self {
        let mut state = Self {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            status: GameStatus::Ongoing,
        };
        state.status = state.compute_status();
        state
    }

    /// Creates a game from an arbitrary position.
    ///
    /// Castling rights whose king or rook is away from its home square are
    /// dropped. Fails if either side does not have exactly one king, a pawn
    /// stands on the first or last row, the side not to move is in check, or
    /// the en-passant target does not sit behind an opposing pawn that could
    /// just have advanced two squares.
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Result<Self, ChessError> {
        for color in Color::ALL {
            let kings = board
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind == PieceType::King)
                .count();
            if kings != 1 {
                return Err(ChessError::InvalidPosition("each side needs one king"));
            }
        }

        for (square, piece) in board.pieces() {
            if piece.kind == PieceType::Pawn && matches!(square.row(), 1 | 8) {
                return Err(ChessError::InvalidPosition("pawn on a back rank"));
            }
        }

        let waiting = side_to_move.opponent();
        if board
            .king_square(waiting)
            .is_some_and(|king| is_attacked(&board, king, side_to_move))
        {
            return Err(ChessError::InvalidPosition("waiting side in check"));
        }

        if let Some(target) = en_passant
            && !en_passant_consistent(&board, side_to_move, target)
        {
            return Err(ChessError::InvalidPosition("bad en passant target"));
        }

        let mut castling = castling;
        for color in Color::ALL {
            let king = Piece::new(color, PieceType::King);
            let rook = Piece::new(color, PieceType::Rook);
            let home = color.home_row();
            for side in CastlingSide::ALL {
                if !castling.has(color, side) {
                    continue;
                }
                let king_home = board.piece_at(Square::at(home, KING_HOME_COLUMN));
                let rook_home = board.piece_at(Square::at(home, side.rook_column()));
                if king_home != Some(king) || rook_home != Some(rook) {
                    log::debug!("dropping {color:?} {side:?} castling right");
                    castling.revoke(color, side);
                }
            }
        }

        let mut state = Self {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number: fullmove_number.max(1),
            status: GameStatus::Ongoing,
        };
        state.status = state.compute_status();
        Ok(state)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Square skipped by a two-square pawn advance on the previous move.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Half-moves since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after each Black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Status of the side to move, as of the last applied move.
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Is the side to move in check?
    pub fn is_check(&self) -> bool {
        self.board
            .king_square(self.side_to_move)
            .is_some_and(|king| is_attacked(&self.board, king, self.side_to_move.opponent()))
    }

    /// Squares of the opposing pieces giving check.
    pub fn checkers(&self) -> Vec<Square> {
        self.board
            .king_square(self.side_to_move)
            .map(|king| attackers(&self.board, king, self.side_to_move.opponent()))
            .unwrap_or_default()
    }

    /// Legal moves of the piece on `from`.
    ///
    /// Empty when the square is empty or holds a piece of the side not to move.
    pub fn legal_moves(&self, from: Square) -> Vec<Move> {
        let Some(piece) = self.board.piece_at(from) else {
            return Vec::new();
        };
        if piece.color != self.side_to_move {
            return Vec::new();
        }

        let mut candidates = piece_moves(&self.board, from, self.en_passant);
        if piece.kind == PieceType::King {
            candidates.extend(self.castling_moves(from, piece.color));
        }
        candidates.retain(|&mv| self.leaves_king_safe(mv, piece.color));
        candidates
    }

    /// Legal moves of every piece of the side to move, a1 first.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        self.board
            .pieces_of(self.side_to_move)
            .flat_map(|(from, _)| self.legal_moves(from))
            .collect()
    }

    /// Plays `mv` for the side to move and returns the new status.
    ///
    /// The state is left untouched when the move is not legal.
    pub fn apply_move(&mut self, mv: Move) -> Result<GameStatus, ChessError> {
        if !self.legal_moves(mv.start).contains(&mv) {
            log::debug!("rejected illegal move {mv} for {:?}", self.side_to_move);
            return Err(ChessError::IllegalMove(mv));
        }

        self.play_unchecked(mv);
        log::debug!(
            "played {mv}, {:?} to move, status {:?}",
            self.side_to_move,
            self.status
        );
        Ok(self.status)
    }

    /// Number of leaf nodes of the legal move tree `depth` plies deep.
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.all_legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        moves
            .into_iter()
            .map(|mv| {
                let mut next = self.clone();
                next.advance(mv);
                next.perft(depth - 1)
            })
            .sum()
    }

    fn play_unchecked(&mut self, mv: Move) {
        self.advance(mv);
        self.status = self.compute_status();
    }

    /// Everything `play_unchecked` does except refreshing the cached status.
    fn advance(&mut self, mv: Move) {
        let Some(mover) = self.board.piece_at(mv.start) else {
            return;
        };

        let captured = execute(&mut self.board, mv, self.en_passant);

        if mover.kind == PieceType::King {
            self.castling.revoke_all(mover.color);
        }
        // A rook leaving its corner or being captured there.
        for square in [mv.start, mv.end] {
            for color in Color::ALL {
                for side in CastlingSide::ALL {
                    if square == Square::at(color.home_row(), side.rook_column()) {
                        self.castling.revoke(color, side);
                    }
                }
            }
        }

        self.en_passant = None;
        if mover.kind == PieceType::Pawn && mv.start.row().abs_diff(mv.end.row()) == 2 {
            let skipped = (mv.start.row() + mv.end.row()) / 2;
            self.en_passant = Some(Square::at(skipped, mv.start.column()));
        }

        if mover.kind == PieceType::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if mover.color == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = self.side_to_move.opponent();
    }

    fn compute_status(&self) -> GameStatus {
        let in_check = self.is_check();
        let can_move = self
            .board
            .pieces_of(self.side_to_move)
            .any(|(from, _)| !self.legal_moves(from).is_empty());

        match (in_check, can_move) {
            (false, true) => GameStatus::Ongoing,
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
        }
    }

    /// Castling moves for a king of `color` standing on `from`.
    fn castling_moves(&self, from: Square, color: Color) -> Vec<Move> {
        let home = color.home_row();
        if from != Square::at(home, KING_HOME_COLUMN) {
            return Vec::new();
        }

        CastlingSide::ALL
            .into_iter()
            .filter(|&side| self.can_castle(color, side))
            .map(|side| Move::new(from, Square::at(home, side.king_target_column())))
            .collect()
    }

    fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        let home = color.home_row();
        let rook = Piece::new(color, PieceType::Rook);
        if !self.castling.has(color, side) {
            return false;
        }
        if self.board.piece_at(Square::at(home, side.rook_column())) != Some(rook) {
            return false;
        }

        let path_clear = side
            .between_columns()
            .iter()
            .all(|&column| self.board.piece_at(Square::at(home, column)).is_none());
        if !path_clear {
            return false;
        }

        let enemy = color.opponent();
        side.king_path_columns()
            .into_iter()
            .all(|column| !is_attacked(&self.board, Square::at(home, column), enemy))
    }

    /// Plays `mv` on a scratch copy and checks the mover's king afterwards.
    fn leaves_king_safe(&self, mv: Move, color: Color) -> bool {
        let mut scratch = self.board;
        execute(&mut scratch, mv, self.en_passant);

        let safe = scratch
            .king_square(color)
            .is_some_and(|king| !is_attacked(&scratch, king, color.opponent()));
        if !safe {
            log::trace!("discarding {mv}: leaves {color:?} king attacked");
        }
        safe
    }
}

/// Moves pieces on `board` for `mv`, including the en-passant victim, the
/// castling rook and promotion. Returns the captured piece, if any.
fn execute(board: &mut Board, mv: Move, en_passant: Option<Square>) -> Option<Piece> {
    let piece = board.piece_at(mv.start)?;
    let mut captured = board.piece_at(mv.end);
    board.set_piece(mv.start, None);

    match piece.kind {
        // Only a diagonal step can land on the empty en-passant target.
        PieceType::Pawn if captured.is_none() && en_passant == Some(mv.end) => {
            let victim = Square::at(mv.start.row(), mv.end.column());
            captured = board.piece_at(victim);
            board.set_piece(victim, None);
        }
        PieceType::King if mv.start.column().abs_diff(mv.end.column()) == 2 => {
            let side = CastlingSide::of_king_move(mv);
            let row = mv.start.row();
            let rook_from = Square::at(row, side.rook_column());
            let rook = board.piece_at(rook_from);
            board.set_piece(rook_from, None);
            board.set_piece(Square::at(row, side.rook_target_column()), rook);
        }
        _ => {}
    }

    let placed = mv
        .promotion
        .map_or(piece, |kind| Piece::new(piece.color, kind));
    board.set_piece(mv.end, Some(placed));
    captured
}

/// The target must be empty, on the row a pawn of the waiting side skips,
/// with that pawn directly behind it.
fn en_passant_consistent(board: &Board, side_to_move: Color, target: Square) -> bool {
    let waiting = side_to_move.opponent();
    let skipped_row = (waiting.pawn_start_row() as i8 + waiting.pawn_direction()) as u8;
    let pawn = Piece::new(waiting, PieceType::Pawn);
    let behind = target.offset(waiting.pawn_direction(), 0);

    target.row() == skipped_row
        && board.piece_at(target).is_none()
        && behind.and_then(|s| board.piece_at(s)) == Some(pawn)
}
