use super::validator::is_valid_move;
use crate::board::{Board, Coord};
use crate::pieces::{Color, Piece, PieceKind};

/// A pseudo-legal move: geometrically legal, not yet checked for leaving its
/// own king in check. The move service filters these through a test-and-undo
/// pass before accepting one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoMove {
    pub from: Coord,
    pub piece: Piece,
    pub to: Coord,
}

/// Every pseudo-legal move available to `color` on `board`.
pub fn all_moves(board: &Board, color: Color) -> Vec<PseudoMove> {
    let mut moves = Vec::new();
    for rank in 1..=8 {
        for file in 1..=8 {
            let coord = Coord::new(rank, file);
            if let Some(piece) = board.piece_at(coord) {
                if piece.color == color {
                    all_valid_moves_of_square(board, coord).for_each(|m| moves.push(m));
                }
            }
        }
    }
    moves
}

/// Every pseudo-legal move of whatever piece sits on `from`, empty if the
/// square is empty.
pub fn all_valid_moves_of_square(board: &Board, from: Coord) -> impl Iterator<Item = PseudoMove> + '_ {
    let piece = board.piece_at(from);
    let candidates: Vec<Coord> = match piece {
        Some(p) => candidate_targets(p, from),
        None => Vec::new(),
    };
    candidates.into_iter().filter_map(move |to| {
        let piece = piece?;
        if !to.on_board() {
            return None;
        }
        is_valid_move(board, piece, from, to).then_some(PseudoMove { from, piece, to })
    })
}

fn candidate_targets(piece: Piece, from: Coord) -> Vec<Coord> {
    match piece.kind {
        PieceKind::King => king_candidates(from),
        PieceKind::Knight => knight_candidates(from),
        PieceKind::Pawn => pawn_candidates(piece.color, from),
        PieceKind::Rook => ray_candidates(from, ROOK_DIRECTIONS),
        PieceKind::Bishop => ray_candidates(from, BISHOP_DIRECTIONS),
        PieceKind::Queen => ray_candidates(from, QUEEN_DIRECTIONS),
    }
}

fn king_candidates(from: Coord) -> Vec<Coord> {
    vec![
        from.offset(1, 0),
        from.offset(-1, 0),
        from.offset(0, 1),
        from.offset(0, -1),
        from.offset(1, 1),
        from.offset(1, -1),
        from.offset(-1, 1),
        from.offset(-1, -1),
        from.offset(0, -2),
        from.offset(0, 2),
    ]
}

fn knight_candidates(from: Coord) -> Vec<Coord> {
    vec![
        from.offset(2, 1),
        from.offset(2, -1),
        from.offset(1, -2),
        from.offset(1, 2),
        from.offset(-1, -2),
        from.offset(-1, 2),
        from.offset(-2, -1),
        from.offset(-2, 1),
    ]
}

fn pawn_candidates(color: Color, from: Coord) -> Vec<Coord> {
    let d = color.pawn_direction();
    vec![
        from.offset(d, 0),
        from.offset(2 * d, 0),
        from.offset(d, 1),
        from.offset(d, -1),
    ]
}

const ROOK_DIRECTIONS: &[(i8, i8)] = &[(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: &[(i8, i8)] = &[(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRECTIONS: &[(i8, i8)] = &[
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Sliding pieces get one candidate per square out to the edge of the board
/// in each direction; [`is_valid_move`] re-walks the path each time and the
/// caller stops offering squares past the first one it rejects, which is
/// exactly how far a rook, bishop or queen can actually reach.
fn ray_candidates(from: Coord, directions: &[(i8, i8)]) -> Vec<Coord> {
    let mut out = Vec::new();
    for &(d_rank, d_file) in directions {
        for step in 1..8 {
            let c = from.offset(d_rank * step, d_file * step);
            if !c.on_board() {
                break;
            }
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, StartPosition};
    use crate::pieces::Piece;

    #[test]
    fn empty_square_yields_no_moves() {
        let board = Board::empty();
        let moves: Vec<_> = all_valid_moves_of_square(&board, Coord::new(4, 4)).collect();
        assert!(moves.is_empty());
    }

    #[test]
    fn all_moves_excludes_the_opponents_pieces() {
        let board = StartPosition::Normal.build();
        for mv in all_moves(&board, Color::White) {
            assert_eq!(mv.piece.color, Color::White);
        }
    }

    #[test]
    fn knight_from_its_starting_square_has_two_targets() {
        let board = StartPosition::Normal.build();
        let moves: Vec<_> = all_valid_moves_of_square(&board, Coord::new(1, 2)).collect();
        assert_eq!(moves.len(), 2);
        for mv in moves {
            assert_eq!(mv.to.rank, 3);
        }
    }

    #[test]
    fn rook_behind_its_own_pawns_has_no_moves() {
        let board = StartPosition::Normal.build();
        let moves: Vec<_> = all_valid_moves_of_square(&board, Coord::new(1, 1)).collect();
        assert!(moves.is_empty());
    }

    #[test]
    fn queen_on_an_open_board_reaches_all_four_edges() {
        let mut board = Board::empty();
        board.set(Coord::new(4, 4), Some(Piece::new(PieceKind::Queen, Color::White)));
        let moves: Vec<_> = all_valid_moves_of_square(&board, Coord::new(4, 4)).collect();
        assert_eq!(moves.len(), 27, "a queen alone on an empty board has 27 targets");
    }
}
