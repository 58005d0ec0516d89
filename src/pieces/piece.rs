use super::color::Color;

/// The six kinds of chess piece, independent of color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Promotion is always to a queen.
pub const PROMOTE_PIECE: PieceKind = PieceKind::Queen;

/// A piece sitting on a square.
///
/// `moved` replaces the three independent "has this piece left its initial
/// square" flags of the original entities (king and rook each carried a
/// `can_castle` flag, pawns an `initial_square` flag) with a single bit:
/// nothing ever reads those flags for any purpose but "is this piece still
/// on its starting square", so one bit serves kings, rooks and pawns alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            moved: false,
        }
    }

    /// True if this piece has never moved, i.e. still sits where it started
    /// the game. Backs the pawn two-step rule and castling eligibility.
    pub fn on_initial_square(&self) -> bool {
        !self.moved
    }

    /// Rooks and kings may only castle while neither has moved.
    pub fn can_castle(&self) -> bool {
        self.on_initial_square()
    }

    pub fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Signed material value: magnitude per kind, sign per color.
    pub fn material_value(&self) -> i32 {
        let magnitude: i32 = match self.kind {
            PieceKind::Pawn => 10,
            PieceKind::Knight => 32,
            PieceKind::Bishop => 33,
            PieceKind::Rook => 50,
            PieceKind::Queen => 90,
            PieceKind::King => 2000,
        };
        magnitude * self.color.sign() as i32
    }
}
