use crate::board::{Board, Coord, StartPosition};
use crate::pieces::{Color, Piece, PieceKind};
use crate::rules;

use super::player_move::{CastlingSide, PlayerMove};

/// The rook's half of a castling move, recorded alongside the king's so a
/// single history entry can undo both in one step.
#[derive(Debug, Clone, Copy)]
pub struct RookCastleRecord {
    pub from: Coord,
    pub to: Coord,
    pub piece_before: Piece,
}

/// Everything needed to reverse one applied move. `piece_before` is the
/// exact value the moving piece held prior to the move (including whether it
/// had already moved), so undoing is a matter of writing this value back
/// rather than separately tracking which flags changed.
#[derive(Debug, Clone, Copy)]
pub struct MoveRecord {
    pub mover: Color,
    pub from: Coord,
    pub to: Coord,
    pub piece_before: Piece,
    pub placed: Piece,
    pub captured: Option<(Coord, Piece)>,
    pub en_passant_move: bool,
    pub enables_en_passant: Option<Coord>,
    pub castling_rook: Option<RookCastleRecord>,
}

/// The transactional chess engine: board plus enough history to apply a
/// move and unwind it exactly, which both the human move path and the
/// search's speculative move testing rely on.
pub struct GameEngine {
    pub(super) board: Board,
    pub(super) turn: Color,
    pub(super) history: Vec<MoveRecord>,
    pub(super) king_squares: [Coord; 2],
}

fn king_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

/// Locates `color`'s king on a freshly built board. Every `StartPosition`
/// preset places exactly one king per color, so this always finds a square;
/// it only runs once, at construction, after which `king_squares` is kept
/// in sync incrementally by `apply_pseudo_move`/`undo`.
fn find_king(board: &Board, color: Color) -> Coord {
    board
        .occupied_squares()
        .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
        .map(|(coord, _)| coord)
        .expect("every start position places a king of each color")
}

impl GameEngine {
    pub fn new(start: StartPosition) -> Self {
        let board = start.build();
        let king_squares = [
            find_king(&board, Color::White),
            find_king(&board, Color::Black),
        ];
        GameEngine {
            board,
            turn: Color::White,
            history: Vec::new(),
            king_squares,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub(crate) fn king_square(&self, color: Color) -> Coord {
        self.king_squares[king_index(color)]
    }

    fn toggle_turn(&mut self) {
        self.turn = self.turn.opposite();
    }

    /// True if `color`'s king sits on a square the opponent attacks right
    /// now. Unlike the turn-juggling original, this takes the color to
    /// check directly rather than inferring it from whose turn it is.
    pub(crate) fn is_in_check(&self, color: Color) -> bool {
        let king_square = self.king_square(color);
        rules::all_moves(&self.board, color.opposite())
            .iter()
            .any(|m| m.to == king_square)
    }

    pub(crate) fn pseudo_legal_moves(&self, color: Color) -> Vec<rules::PseudoMove> {
        rules::all_moves(&self.board, color)
    }

    /// Attempts to apply a pre-validated pseudo-legal move and roll it back
    /// if it leaves the mover's own king in check. Returns whether the move
    /// was legal; on `false` the board is left exactly as it was. A king's
    /// two-square move is additionally gated on the square-by-square attack
    /// probe, since the landing-square self-check test alone would miss an
    /// attacked square the king only passes through.
    pub(crate) fn test_and_apply(&mut self, mv: rules::PseudoMove) -> bool {
        if mv.piece.kind == PieceKind::King
            && self.is_castling_attempt(mv.from, mv.to)
            && !self.castling_path_is_safe(mv.piece, mv.from, mv.to)
        {
            return false;
        }
        self.apply_pseudo_move(mv);
        if self.is_in_check(mv.piece.color) {
            self.undo();
            false
        } else {
            true
        }
    }

    /// Attempts a player's move end to end: shape validation, castling
    /// legality (including the square-by-square attack probe), application,
    /// and the self-check rollback. Mirrors the original step order:
    /// capture resolution, castling side effects, history push, en passant
    /// capture, normal placement, then the special-move bookkeeping.
    pub fn try_human_move(&mut self, player_move: PlayerMove, mover: Color) -> super::move_results::MoveResult {
        use super::move_results::{MoveOutcome, MoveRejection};

        if mover != self.turn {
            return Err(MoveRejection::NotYourTurn);
        }

        let (from, to) = match player_move {
            PlayerMove::Normal(normal) => normal.squares(),
            PlayerMove::Castling(side) => self.castling_squares(side),
        };

        let piece = match self.board.piece_at(from) {
            Some(p) => p,
            None => return Err(MoveRejection::NoPieceAtSquare),
        };
        if piece.color != mover {
            return Err(MoveRejection::NotYourPiece);
        }
        if !rules::is_valid_move(&self.board, piece, from, to) {
            return Err(MoveRejection::IllegalMove);
        }
        if piece.kind == PieceKind::King && self.is_castling_attempt(from, to) {
            if !self.castling_path_is_safe(piece, from, to) {
                return Err(MoveRejection::CastlingNotAllowed);
            }
        }

        let mv = rules::PseudoMove { from, piece, to };
        if !self.test_and_apply(mv) {
            return Err(MoveRejection::KingStillChecked);
        }

        let promoted = piece.kind == PieceKind::Pawn
            && self.history.last().map(|r| r.placed.kind) == Some(PieceKind::Queen);

        match self.status_after_move() {
            MoveOutcome::Ok if promoted => Ok(MoveOutcome::Promote),
            other => Ok(other),
        }
    }

    fn is_castling_attempt(&self, from: Coord, to: Coord) -> bool {
        from.rank == to.rank && (to.file - from.file).abs() >= 2
    }

    fn castling_squares(&self, side: CastlingSide) -> (Coord, Coord) {
        let rank = self.king_square(self.turn).rank;
        let from = Coord::new(rank, 5);
        let to = match side {
            CastlingSide::Short => Coord::new(rank, 7),
            CastlingSide::Long => Coord::new(rank, 3),
        };
        (from, to)
    }

    /// The transactional castling probe. The king may not already be in
    /// check, and it walks the squares between its start and destination one
    /// at a time, each step left applied on top of the last so the next
    /// step's self-check test sees the king actually standing there; all
    /// applied steps are undone together once the walk finishes. Short
    /// castling checks a single intermediate square; long castling checks
    /// two, matching the asymmetry of the original probe (the king's final
    /// square on the kingside is never itself re-tested).
    fn castling_path_is_safe(&mut self, king: Piece, from: Coord, to: Coord) -> bool {
        if self.is_in_check(king.color) {
            return false;
        }
        let delta = to.file - from.file;
        let step_file = delta.signum();
        let steps = if delta > 0 { 1 } else { 2 };
        let mut current = from;
        let mut applied = 0;
        for _ in 0..steps {
            let next = current.offset(0, step_file);
            let probe = rules::PseudoMove {
                from: current,
                piece: king,
                to: next,
            };
            if !self.test_and_apply(probe) {
                for _ in 0..applied {
                    self.undo();
                }
                return false;
            }
            applied += 1;
            current = next;
        }
        for _ in 0..applied {
            self.undo();
        }
        true
    }

    /// Applies a move without any legality check; callers are expected to
    /// have already confirmed the move is pseudo-legal.
    pub(crate) fn apply_pseudo_move(&mut self, mv: rules::PseudoMove) {
        let rules::PseudoMove { from, piece, to } = mv;

        let captured = self.resolve_capture(piece, from, to);
        let castling_rook = self.castling_rook_move(piece, from, to);
        if let Some(rook_mv) = castling_rook {
            self.place_rook_for_castling(rook_mv);
        }

        let en_passant_move = captured.map(|(sq, _)| sq != to).unwrap_or(false);
        let mut placed = piece;
        placed.mark_moved();

        let enables_en_passant = self.pawn_two_step_en_passant_target(piece, from, to);
        let promoted = piece.kind == PieceKind::Pawn && to.rank == piece.color.promotion_rank();
        if promoted {
            placed = Piece::new(crate::pieces::PROMOTE_PIECE, piece.color);
            placed.mark_moved();
        }

        self.board.set(to, Some(placed));
        self.board.set(from, None);
        self.board.set_en_passant_target(enables_en_passant);

        if piece.kind == PieceKind::King {
            self.king_squares[king_index(piece.color)] = to;
        }

        self.history.push(MoveRecord {
            mover: piece.color,
            from,
            to,
            piece_before: piece,
            placed,
            captured,
            en_passant_move,
            enables_en_passant,
            castling_rook,
        });

        self.toggle_turn();
    }

    fn resolve_capture(&self, piece: Piece, from: Coord, to: Coord) -> Option<(Coord, Piece)> {
        if let Some(occupant) = self.board.piece_at(to) {
            return Some((to, occupant));
        }
        if piece.kind == PieceKind::Pawn && from.file != to.file {
            let captured_square = Coord::new(from.rank, to.file);
            if let Some(occupant) = self.board.piece_at(captured_square) {
                return Some((captured_square, occupant));
            }
        }
        None
    }

    fn pawn_two_step_en_passant_target(&self, piece: Piece, from: Coord, to: Coord) -> Option<Coord> {
        if piece.kind != PieceKind::Pawn || from.file != to.file {
            return None;
        }
        if (to.rank - from.rank).abs() != 2 {
            return None;
        }
        Some(from.offset(piece.color.pawn_direction(), 0))
    }

    fn castling_rook_move(&self, piece: Piece, from: Coord, to: Coord) -> Option<RookCastleRecord> {
        if piece.kind != PieceKind::King || from.rank != to.rank {
            return None;
        }
        let delta = to.file - from.file;
        let (rook_from, rook_to) = match delta {
            2 => (from.offset(0, 3), from.offset(0, 1)),
            -2 => (from.offset(0, -4), from.offset(0, -1)),
            _ => return None,
        };
        self.board.piece_at(rook_from).map(|rook| RookCastleRecord {
            from: rook_from,
            to: rook_to,
            piece_before: rook,
        })
    }

    fn place_rook_for_castling(&mut self, rook_mv: RookCastleRecord) {
        let mut rook = rook_mv.piece_before;
        rook.mark_moved();
        self.board.set(rook_mv.to, Some(rook));
        self.board.set(rook_mv.from, None);
    }

    /// Determines check/checkmate/stalemate for the player now to move,
    /// exactly as the facade's game-status scan does: look for any legal
    /// reply, then fall back to whether that player's king is attacked.
    pub(crate) fn status_after_move(&mut self) -> super::move_results::MoveOutcome {
        use super::move_results::MoveOutcome;

        let to_move = self.turn;
        let has_reply = self.any_legal_move(to_move);
        let in_check = self.is_in_check(to_move);
        match (has_reply, in_check) {
            (true, true) => MoveOutcome::Check,
            (true, false) => MoveOutcome::Ok,
            (false, true) => MoveOutcome::Checkmate,
            (false, false) => MoveOutcome::Stalemate,
        }
    }

    pub(crate) fn any_legal_move(&mut self, color: Color) -> bool {
        for mv in self.pseudo_legal_moves(color) {
            if self.test_and_apply(mv) {
                self.undo();
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_at(engine: &GameEngine, rank: i8, file: i8) -> Option<Piece> {
        engine.board.piece_at(Coord::new(rank, file))
    }

    /// A bare board with only the two kings and whatever extra pieces are
    /// given, neither king in check. Used where the named `StartPosition`
    /// presets carry incidental pieces (e.g. `Castling`'s rook shares a file
    /// with the black king) that would trip a self-check unrelated to what
    /// the test exercises.
    fn minimal_engine(extra: &[(i8, i8, PieceKind, Color)]) -> GameEngine {
        let mut board = Board::empty();
        board.set(Coord::new(1, 5), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(Coord::new(8, 5), Some(Piece::new(PieceKind::King, Color::Black)));
        for &(rank, file, kind, color) in extra {
            board.set(Coord::new(rank, file), Some(Piece::new(kind, color)));
        }
        GameEngine {
            board,
            turn: Color::White,
            history: Vec::new(),
            king_squares: [Coord::new(1, 5), Coord::new(8, 5)],
        }
    }

    #[test]
    fn e1_opening_pawn_push() {
        let mut engine = GameEngine::new(StartPosition::Normal);
        let result = engine.try_human_move(PlayerMove::normal(Coord::new(2, 2), Coord::new(4, 2)), Color::White);
        assert!(result.is_ok());
        assert!(piece_at(&engine, 2, 2).is_none());
        let moved = piece_at(&engine, 4, 2).expect("pawn should have landed on b4");
        assert_eq!(moved.kind, PieceKind::Pawn);
        assert!(!moved.on_initial_square());
        assert_eq!(engine.turn(), Color::Black);
    }

    #[test]
    fn e2_undo_reverts_opening_push() {
        let mut engine = GameEngine::new(StartPosition::Normal);
        engine
            .try_human_move(PlayerMove::normal(Coord::new(2, 2), Coord::new(4, 2)), Color::White)
            .unwrap();
        engine.undo();
        let pawn = piece_at(&engine, 2, 2).expect("pawn should be back on b2");
        assert!(pawn.on_initial_square());
        assert_eq!(engine.turn(), Color::White);
        assert!(engine.history.is_empty());
    }

    #[test]
    fn e5_castling_succeeds() {
        let mut engine = GameEngine::new(StartPosition::Castling);
        let result = engine.try_human_move(PlayerMove::normal(Coord::new(1, 5), Coord::new(1, 7)), Color::White);
        assert!(result.is_ok(), "short castle should succeed: {result:?}");
        let rook = piece_at(&engine, 1, 6).expect("rook should land on f1");
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(!rook.can_castle());
        let king = piece_at(&engine, 1, 7).expect("king should land on g1");
        assert_eq!(king.kind, PieceKind::King);
        assert!(!king.can_castle());
    }

    #[test]
    fn e6_castling_blocked_leaves_board_unchanged() {
        let mut engine = GameEngine::new(StartPosition::FailCastling);
        let before = engine.board.clone();
        let result = engine.try_human_move(PlayerMove::normal(Coord::new(1, 5), Coord::new(1, 8)), Color::White);
        assert!(result.is_err());
        assert_eq!(engine.board, before);
    }

    #[test]
    fn castling_side_enum_reaches_the_same_squares_as_raw_coordinates() {
        let mut engine = GameEngine::new(StartPosition::Castling);
        let result = engine.try_human_move(PlayerMove::Castling(CastlingSide::Short), Color::White);
        assert!(result.is_ok(), "castling via the side enum should also succeed: {result:?}");
    }

    #[test]
    fn e7_en_passant_capture() {
        let mut engine = minimal_engine(&[
            (2, 2, PieceKind::Pawn, Color::White),
            (4, 3, PieceKind::Pawn, Color::Black),
        ]);
        engine
            .try_human_move(PlayerMove::normal(Coord::new(2, 2), Coord::new(4, 2)), Color::White)
            .unwrap();
        let result = engine.try_human_move(PlayerMove::normal(Coord::new(4, 3), Coord::new(3, 2)), Color::Black);
        assert!(result.is_ok(), "en passant capture should succeed: {result:?}");
        assert!(piece_at(&engine, 4, 2).is_none(), "captured pawn should be gone");
        let landed = piece_at(&engine, 3, 2).expect("capturing pawn should land behind");
        assert_eq!(landed.color, Color::Black);
        assert!(engine.board.en_passant_target().is_none());
    }

    #[test]
    fn king_position_cache_tracks_real_king_square() {
        let mut engine = GameEngine::new(StartPosition::Castling);
        engine
            .try_human_move(PlayerMove::Castling(CastlingSide::Short), Color::White)
            .unwrap();
        assert_eq!(engine.king_square(Color::White), Coord::new(1, 7));
        engine.undo();
        assert_eq!(engine.king_square(Color::White), Coord::new(1, 5));
    }

    #[test]
    fn en_passant_target_clears_after_unrelated_move() {
        let mut engine = minimal_engine(&[
            (2, 2, PieceKind::Pawn, Color::White),
            (7, 3, PieceKind::Pawn, Color::Black),
        ]);
        engine
            .try_human_move(PlayerMove::normal(Coord::new(2, 2), Coord::new(4, 2)), Color::White)
            .unwrap();
        assert!(engine.board.en_passant_target().is_some());
        engine
            .try_human_move(PlayerMove::normal(Coord::new(7, 3), Coord::new(6, 3)), Color::Black)
            .unwrap();
        assert!(engine.board.en_passant_target().is_none());
    }

    #[test]
    fn apply_then_undo_is_a_board_noop() {
        let mut engine = GameEngine::new(StartPosition::Normal);
        let before = engine.board.clone();
        engine
            .try_human_move(PlayerMove::normal(Coord::new(2, 5), Coord::new(4, 5)), Color::White)
            .unwrap();
        engine.undo();
        assert_eq!(engine.board, before);
        assert!(engine.history.is_empty());
    }

    #[test]
    fn pawn_two_step_only_available_from_initial_square() {
        let mut engine = GameEngine::new(StartPosition::Normal);
        engine
            .try_human_move(PlayerMove::normal(Coord::new(2, 2), Coord::new(3, 2)), Color::White)
            .unwrap();
        engine
            .try_human_move(PlayerMove::normal(Coord::new(7, 2), Coord::new(6, 2)), Color::Black)
            .unwrap();
        let result = engine.try_human_move(PlayerMove::normal(Coord::new(3, 2), Coord::new(5, 2)), Color::White);
        assert!(result.is_err(), "pawn that already moved may not advance two squares");
    }

    #[test]
    fn test_and_apply_rejects_castling_through_an_attacked_square() {
        // White king e1, rook h1, both still allowed to castle; a black
        // rook on f8 attacks f1 (the square the king passes through on its
        // way to g1) without attacking e1 or g1 themselves. A bug in
        // test_and_apply that only checked the landing square would let
        // this castle through; the transactional probe must reject it,
        // since this is the same chokepoint any_legal_move and the search
        // probe moves through.
        let mut engine = minimal_engine(&[
            (1, 8, PieceKind::Rook, Color::White),
            (8, 6, PieceKind::Rook, Color::Black),
        ]);
        let king = piece_at(&engine, 1, 5).expect("white king should be on e1");
        let castle = rules::PseudoMove {
            from: Coord::new(1, 5),
            piece: king,
            to: Coord::new(1, 7),
        };
        let before = engine.board.clone();
        assert!(
            !engine.test_and_apply(castle),
            "castling through an attacked square must be rejected"
        );
        assert_eq!(engine.board, before);
    }

    #[test]
    fn wrong_turn_is_rejected() {
        let mut engine = GameEngine::new(StartPosition::Normal);
        let result = engine.try_human_move(PlayerMove::normal(Coord::new(7, 2), Coord::new(6, 2)), Color::Black);
        assert!(result.is_err());
        let before = engine.try_human_move(PlayerMove::normal(Coord::new(2, 2), Coord::new(4, 2)), Color::Black);
        assert!(before.is_err());
    }
}
