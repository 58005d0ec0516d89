use super::board::Board;
use super::coord::Coord;
use crate::pieces::{Color, Piece, PieceKind};

/// The starting positions the original test fixtures were built around.
/// `Normal` is the only one a real game is ever seeded with; the rest exist
/// to pin down specific rules scenarios (castling, check, stalemate, ...)
/// for the test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPosition {
    Normal,
    Checkmate,
    Stalemate,
    Check,
    Castling,
    FailCastling,
    CheckInOneForWhite,
    CheckInOneForBlack,
    EndGameEvaluation,
}

impl StartPosition {
    pub fn build(self) -> Board {
        let mut board = Board::empty();
        match self {
            StartPosition::Normal => place_normal(&mut board),
            StartPosition::Checkmate => place_checkmate(&mut board),
            StartPosition::Stalemate => place_stalemate(&mut board),
            StartPosition::Check => place_check(&mut board),
            StartPosition::Castling => place_castling(&mut board),
            StartPosition::FailCastling => place_fail_castling(&mut board),
            StartPosition::CheckInOneForWhite => place_check_in_one_for_white(&mut board),
            StartPosition::CheckInOneForBlack => place_check_in_one_for_black(&mut board),
            StartPosition::EndGameEvaluation => place_end_game_evaluation(&mut board),
        }
        board
    }
}

fn put(board: &mut Board, rank: i8, file: i8, kind: PieceKind, color: Color) {
    board.set(Coord::new(rank, file), Some(Piece::new(kind, color)));
}

fn place_normal(board: &mut Board) {
    use PieceKind::*;
    let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
    for (i, kind) in back_rank.iter().enumerate() {
        let file = (i + 1) as i8;
        put(board, 1, file, *kind, Color::White);
        put(board, 8, file, *kind, Color::Black);
    }
    for file in 1..=8 {
        put(board, 2, file, Pawn, Color::White);
        put(board, 7, file, Pawn, Color::Black);
    }
}

/// Normal position with both queens removed, used to exercise the
/// end-game split of the evaluator.
fn place_end_game_evaluation(board: &mut Board) {
    place_normal(board);
    board.set(Coord::new(8, 4), None);
    board.set(Coord::new(1, 4), None);
}

fn place_check_in_one_for_white(board: &mut Board) {
    use PieceKind::*;
    put(board, 8, 1, King, Color::Black);
    put(board, 3, 8, King, Color::White);
    put(board, 2, 3, Rook, Color::White);
    put(board, 1, 2, Rook, Color::White);
}

fn place_check_in_one_for_black(board: &mut Board) {
    use PieceKind::*;
    put(board, 8, 1, King, Color::White);
    put(board, 3, 8, King, Color::Black);
    put(board, 2, 3, Rook, Color::Black);
    put(board, 1, 2, Rook, Color::Black);
}

fn place_castling(board: &mut Board) {
    use PieceKind::*;
    put(board, 8, 8, Queen, Color::Black);
    put(board, 7, 3, Pawn, Color::Black);
    put(board, 6, 8, King, Color::Black);
    put(board, 5, 4, Pawn, Color::White);
    put(board, 4, 3, Pawn, Color::Black);
    put(board, 2, 1, Pawn, Color::White);
    put(board, 2, 2, Pawn, Color::White);
    put(board, 1, 1, Rook, Color::White);
    put(board, 1, 5, King, Color::White);
    put(board, 1, 8, Rook, Color::White);
}

fn place_fail_castling(board: &mut Board) {
    use PieceKind::*;
    put(board, 8, 1, Queen, Color::Black);
    put(board, 7, 7, Pawn, Color::White);
    put(board, 6, 7, Pawn, Color::White);
    put(board, 6, 8, King, Color::Black);
    put(board, 1, 1, Rook, Color::White);
    put(board, 1, 5, King, Color::White);
}

fn place_checkmate(board: &mut Board) {
    use PieceKind::*;
    put(board, 6, 8, King, Color::Black);
    put(board, 2, 1, Queen, Color::Black);
    put(board, 1, 1, King, Color::White);
    put(board, 1, 2, Queen, Color::Black);
    put(board, 1, 4, Queen, Color::Black);
}

fn place_stalemate(board: &mut Board) {
    use PieceKind::*;
    put(board, 6, 8, King, Color::Black);
    put(board, 3, 2, Queen, Color::Black);
    put(board, 2, 3, Queen, Color::Black);
    put(board, 1, 1, King, Color::White);
}

fn place_check(board: &mut Board) {
    use PieceKind::*;
    put(board, 6, 8, King, Color::Black);
    put(board, 2, 8, Queen, Color::Black);
    put(board, 1, 1, King, Color::White);
}
