/// One side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the other color.
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1 for white, -1 for black. Used by the evaluator to build a
    /// white-relative score out of per-piece magnitudes.
    pub fn sign(self) -> f32 {
        match self {
            Color::White => 1.0,
            Color::Black => -1.0,
        }
    }

    /// Direction a pawn of this color advances in, expressed as a rank delta.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank a pawn of this color promotes on.
    pub fn promotion_rank(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => 1,
        }
    }
}
