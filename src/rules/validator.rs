use crate::board::{Board, Coord};
use crate::pieces::{Piece, PieceKind};

/// Pure move-shape and occupancy checks. None of these functions touch move
/// history or look at whether a move leaves its own king in check — that is
/// the job of the transactional move service, which calls into here only to
/// ask "is this geometrically a legal chess move on this board".
pub fn is_valid_move(board: &Board, piece: Piece, from: Coord, to: Coord) -> bool {
    match piece.kind {
        PieceKind::Queen => is_valid_sliding_move(board, piece, from, to, true, true),
        PieceKind::Rook => is_valid_sliding_move(board, piece, from, to, true, false),
        PieceKind::Bishop => is_valid_sliding_move(board, piece, from, to, false, true),
        PieceKind::Knight => is_valid_knight_move(board, piece, from, to),
        PieceKind::Pawn => is_valid_pawn_move(board, piece, from, to),
        PieceKind::King => is_valid_king_move(board, piece, from, to),
    }
}

fn occupant_is_capturable(board: &Board, piece: Piece, to: Coord) -> Option<bool> {
    board.piece_at(to).map(|target| target.color != piece.color)
}

fn is_valid_knight_move(board: &Board, piece: Piece, from: Coord, to: Coord) -> bool {
    if occupant_is_capturable(board, piece, to) == Some(false) {
        return false;
    }
    let d_rank = (from.rank - to.rank).abs();
    let d_file = (from.file - to.file).abs();
    d_rank * d_file == 2
}

/// Shared path-walker for rooks, bishops and queens: straight lines for
/// `straight`, diagonals for `diagonal`. Every square strictly between
/// `from` and `to` must be empty; `to` itself may hold an enemy piece.
fn is_valid_sliding_move(
    board: &Board,
    piece: Piece,
    from: Coord,
    to: Coord,
    straight: bool,
    diagonal: bool,
) -> bool {
    if from == to {
        return false;
    }
    if occupant_is_capturable(board, piece, to) == Some(false) {
        return false;
    }
    let d_rank = to.rank - from.rank;
    let d_file = to.file - from.file;
    let is_straight = straight && (d_rank == 0 || d_file == 0);
    let is_diagonal = diagonal && d_rank.abs() == d_file.abs();
    if !is_straight && !is_diagonal {
        return false;
    }
    let step_rank = d_rank.signum();
    let step_file = d_file.signum();
    let mut cur = from.offset(step_rank, step_file);
    while cur != to {
        if board.piece_at(cur).is_some() {
            return false;
        }
        cur = cur.offset(step_rank, step_file);
    }
    true
}

fn is_valid_pawn_move(board: &Board, piece: Piece, from: Coord, to: Coord) -> bool {
    if occupant_is_capturable(board, piece, to) == Some(false) {
        return false;
    }
    let direction = piece.color.pawn_direction();
    let rank_change = (to.rank - from.rank) * direction;
    let file_change = (from.file - to.file).abs();
    if !(1..=2).contains(&rank_change) {
        return false;
    }
    match rank_change {
        2 => is_valid_pawn_two_step(board, piece, from, to, file_change),
        1 if file_change == 1 => is_valid_pawn_diagonal(board, to),
        1 if file_change == 0 => board.piece_at(to).is_none(),
        _ => false,
    }
}

fn is_valid_pawn_two_step(
    board: &Board,
    piece: Piece,
    from: Coord,
    to: Coord,
    file_change: i8,
) -> bool {
    if file_change != 0 || !piece.on_initial_square() || board.piece_at(to).is_some() {
        return false;
    }
    let intermediate = from.offset(piece.color.pawn_direction(), 0);
    board.piece_at(intermediate).is_none()
}

fn is_valid_pawn_diagonal(board: &Board, to: Coord) -> bool {
    if board.piece_at(to).is_some() {
        // Occupant color already ruled out by the shared capture check above.
        return true;
    }
    board.en_passant_target() == Some(to)
}

fn is_valid_king_move(board: &Board, piece: Piece, from: Coord, to: Coord) -> bool {
    if occupant_is_capturable(board, piece, to) == Some(false) {
        return false;
    }
    let d_rank = from.rank - to.rank;
    let d_file = from.file - to.file;
    if d_rank.abs() + d_file.abs() == 1 {
        return true;
    }
    if d_rank.abs() + d_file.abs() == 2 && d_rank != 0 && d_file != 0 {
        return true;
    }
    if d_rank == 0 {
        return is_valid_castling_shape(board, piece, from, d_file);
    }
    false
}

/// Checks only that the squares between king and rook are clear and that
/// both pieces still have their castling rights; does not check whether the
/// king passes through an attacked square — the move service does that with
/// a transactional probe.
fn is_valid_castling_shape(board: &Board, piece: Piece, from: Coord, d_file: i8) -> bool {
    if !piece.can_castle() {
        return false;
    }
    match d_file {
        -2 => {
            let s1 = from.offset(0, 1);
            let s2 = from.offset(0, 2);
            let s3 = from.offset(0, 3);
            board.piece_at(s1).is_none()
                && board.piece_at(s2).is_none()
                && matches!(
                    board.piece_at(s3),
                    Some(rook) if rook.kind == PieceKind::Rook && rook.color == piece.color && rook.can_castle()
                )
        }
        2 => {
            let s1 = from.offset(0, -1);
            let s2 = from.offset(0, -2);
            let s3 = from.offset(0, -3);
            let s4 = from.offset(0, -4);
            board.piece_at(s1).is_none()
                && board.piece_at(s2).is_none()
                && board.piece_at(s3).is_none()
                && matches!(
                    board.piece_at(s4),
                    Some(rook) if rook.kind == PieceKind::Rook && rook.color == piece.color && rook.can_castle()
                )
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Color;

    fn piece(kind: PieceKind, color: Color) -> Piece {
        Piece::new(kind, color)
    }

    #[test]
    fn pawn_two_step_requires_both_squares_clear() {
        let mut board = Board::empty();
        let white_pawn = piece(PieceKind::Pawn, Color::White);
        board.set(Coord::new(2, 4), Some(white_pawn));
        assert!(is_valid_move(&board, white_pawn, Coord::new(2, 4), Coord::new(4, 4)));

        board.set(Coord::new(3, 4), Some(piece(PieceKind::Pawn, Color::Black)));
        assert!(!is_valid_move(&board, white_pawn, Coord::new(2, 4), Coord::new(4, 4)));
    }

    #[test]
    fn pawn_two_step_only_from_initial_square() {
        let mut board = Board::empty();
        let mut moved_pawn = piece(PieceKind::Pawn, Color::White);
        moved_pawn.mark_moved();
        board.set(Coord::new(3, 4), Some(moved_pawn));
        assert!(!is_valid_move(&board, moved_pawn, Coord::new(3, 4), Coord::new(5, 4)));
    }

    #[test]
    fn pawn_diagonal_requires_capture_or_en_passant() {
        let mut board = Board::empty();
        let white_pawn = piece(PieceKind::Pawn, Color::White);
        board.set(Coord::new(4, 4), Some(white_pawn));
        assert!(!is_valid_move(&board, white_pawn, Coord::new(4, 4), Coord::new(5, 5)));

        board.set(Coord::new(5, 5), Some(piece(PieceKind::Pawn, Color::Black)));
        assert!(is_valid_move(&board, white_pawn, Coord::new(4, 4), Coord::new(5, 5)));

        board.set(Coord::new(5, 5), None);
        board.set_en_passant_target(Some(Coord::new(5, 5)));
        assert!(is_valid_move(&board, white_pawn, Coord::new(4, 4), Coord::new(5, 5)));
    }

    #[test]
    fn knight_moves_are_l_shaped() {
        let mut board = Board::empty();
        let knight = piece(PieceKind::Knight, Color::White);
        board.set(Coord::new(4, 4), Some(knight));
        assert!(is_valid_move(&board, knight, Coord::new(4, 4), Coord::new(6, 5)));
        assert!(!is_valid_move(&board, knight, Coord::new(4, 4), Coord::new(5, 5)));
        assert!(!is_valid_move(&board, knight, Coord::new(4, 4), Coord::new(6, 6)));
    }

    #[test]
    fn rook_cannot_leap_over_a_blocking_piece() {
        let mut board = Board::empty();
        let rook = piece(PieceKind::Rook, Color::White);
        board.set(Coord::new(1, 1), Some(rook));
        board.set(Coord::new(1, 4), Some(piece(PieceKind::Pawn, Color::White)));
        assert!(is_valid_move(&board, rook, Coord::new(1, 1), Coord::new(1, 3)));
        assert!(!is_valid_move(&board, rook, Coord::new(1, 1), Coord::new(1, 8)));
    }

    #[test]
    fn king_cannot_move_onto_a_friendly_piece() {
        let mut board = Board::empty();
        let king = piece(PieceKind::King, Color::White);
        board.set(Coord::new(1, 5), Some(king));
        board.set(Coord::new(1, 6), Some(piece(PieceKind::Pawn, Color::White)));
        assert!(!is_valid_move(&board, king, Coord::new(1, 5), Coord::new(1, 6)));
    }

    #[test]
    fn castling_shape_requires_an_unmoved_rook_and_a_clear_path() {
        let mut board = Board::empty();
        let king = piece(PieceKind::King, Color::White);
        let rook = piece(PieceKind::Rook, Color::White);
        board.set(Coord::new(1, 5), Some(king));
        board.set(Coord::new(1, 8), Some(rook));
        assert!(is_valid_move(&board, king, Coord::new(1, 5), Coord::new(1, 7)));

        let mut moved_rook = rook;
        moved_rook.mark_moved();
        board.set(Coord::new(1, 8), Some(moved_rook));
        assert!(!is_valid_move(&board, king, Coord::new(1, 5), Coord::new(1, 7)));
    }
}
