//! Numeric tables backing the static evaluator: material, piece-square
//! position bonuses, and sliding/knight mobility bonuses. Values and table
//! shapes are reproduced verbatim from the evaluator this crate's behavior
//! is grounded on, not re-derived.

use crate::pieces::{Color, PieceKind};

/// Per-(kind, color) 8x8 position bonus, indexed `[rank - 1][8 - file]`
/// (rank and file both 1-based) to match the source table's own row/column
/// convention. Every table here happens to be left-right symmetric, so the
/// `8 - file` vs `file - 1` distinction never actually changes a lookup,
/// but the formula is kept faithful to the source rather than simplified.
pub type PositionTable = [[f32; 8]; 8];

pub fn position_value(kind: PieceKind, color: Color, rank: i8, file: i8) -> f32 {
    let table = match (kind, color) {
        (PieceKind::Pawn, Color::White) => &WHITE_PAWN,
        (PieceKind::Pawn, Color::Black) => &BLACK_PAWN,
        (PieceKind::Knight, Color::White) => &WHITE_KNIGHT,
        (PieceKind::Knight, Color::Black) => &BLACK_KNIGHT,
        (PieceKind::Bishop, Color::White) => &WHITE_BISHOP,
        (PieceKind::Bishop, Color::Black) => &BLACK_BISHOP,
        (PieceKind::Rook, Color::White) => &WHITE_ROOK,
        (PieceKind::Rook, Color::Black) => &BLACK_ROOK,
        (PieceKind::Queen, Color::White) => &WHITE_QUEEN,
        (PieceKind::Queen, Color::Black) => &BLACK_QUEEN,
        (PieceKind::King, Color::White) => &WHITE_KING,
        (PieceKind::King, Color::Black) => &BLACK_KING,
    };
    let row = (rank - 1) as usize;
    let col = (8 - file) as usize;
    color.sign() * table[row][col]
}

/// Mobility bonus for a sliding piece or knight, indexed by the count of
/// pseudo-legal targets it currently has. Queen has no end-game table: the
/// source never distinguishes queen mobility by game phase.
pub fn mobility_value(kind: PieceKind, mobility: usize, end_game: bool) -> f32 {
    let table: &[f32] = match (kind, end_game) {
        (PieceKind::Knight, false) => &MOBILITY_MID_KNIGHT,
        (PieceKind::Knight, true) => &MOBILITY_END_KNIGHT,
        (PieceKind::Bishop, false) => &MOBILITY_MID_BISHOP,
        (PieceKind::Bishop, true) => &MOBILITY_END_BISHOP,
        (PieceKind::Rook, false) => &MOBILITY_MID_ROOK,
        (PieceKind::Rook, true) => &MOBILITY_END_ROOK,
        (PieceKind::Queen, _) => &MOBILITY_MID_QUEEN,
        _ => return 0.0,
    };
    let index = mobility.min(table.len() - 1);
    debug_assert!(
        mobility < table.len(),
        "mobility count {mobility} overshoots the {kind:?} table (len {}); generator produced more targets than possible",
        table.len()
    );
    table[index]
}

pub const MOBILITY_MID_KNIGHT: [f32; 9] = [-1.5, -0.5, -0.1, 0.2, 0.5, 0.7, 0.9, 1.1, 1.3];
pub const MOBILITY_END_KNIGHT: [f32; 9] = [-3.0, -1.0, -0.2, 0.4, 1.0, 1.4, 1.8, 2.2, 2.6];

pub const MOBILITY_MID_BISHOP: [f32; 14] = [
    -2.5, -1.1, -0.6, -0.1, 0.3, 0.6, 0.9, 1.2, 1.4, 1.7, 1.9, 2.1, 2.3, 2.5,
];
pub const MOBILITY_END_BISHOP: [f32; 14] = [
    -5.0, -2.2, -1.1, -0.2, 0.6, 1.2, 1.8, 2.4, 2.9, 3.4, 3.8, 4.2, 4.6, 5.0,
];

pub const MOBILITY_MID_ROOK: [f32; 15] = [
    -1.0, -0.4, -0.2, 0.0, 0.2, 0.3, 0.4, 0.5, 0.6, 0.8, 0.8, 0.9, 1.0, 1.1, 1.2,
];
pub const MOBILITY_END_ROOK: [f32; 15] = [
    -5.0, -2.2, -1.1, -0.2, 0.6, 1.2, 1.8, 2.4, 2.9, 3.4, 3.8, 4.2, 4.6, 5.0, 5.4,
];

pub const MOBILITY_MID_QUEEN: [f32; 28] = [
    -1.0, -0.6, -0.5, -0.4, -0.2, -0.2, -0.1, 0.0, 0.1, 0.2, 0.2, 0.3, 0.3, 0.4, 0.4, 0.5, 0.6,
    0.6, 0.6, 0.7, 0.7, 0.8, 0.8, 0.9, 0.9, 1.0, 1.0, 1.0,
];

const BLACK_PAWN: PositionTable = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
    [1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0],
    [0.5, 0.5, 1.0, 2.5, 2.5, 1.0, 0.5, 0.5],
    [0.0, 0.0, 0.0, 2.0, 2.0, 0.0, 0.0, 0.0],
    [0.5, -0.5, -1.0, 0.0, 0.0, -1.0, -0.5, 0.5],
    [0.5, 1.0, 1.0, -2.0, -2.0, 1.0, 1.0, 0.5],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

const BLACK_KNIGHT: PositionTable = [
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
    [-4.0, -2.0, 0.0, 0.0, 0.0, 0.0, -2.0, -4.0],
    [-3.0, 0.0, 1.0, 1.5, 1.5, 1.0, 0.0, -3.0],
    [-3.0, 0.5, 1.5, 2.0, 2.0, 1.5, 0.5, -3.0],
    [-3.0, 0.0, 1.5, 2.0, 2.0, 1.5, 0.0, -3.0],
    [-3.0, 0.5, 1.0, 1.5, 1.5, 1.0, 0.5, -3.0],
    [-4.0, -2.0, 0.0, 0.5, 0.5, 0.0, -2.0, -4.0],
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
];

const BLACK_BISHOP: PositionTable = [
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.5, 1.0, 1.0, 0.5, 0.0, -1.0],
    [-1.0, 0.5, 0.5, 1.0, 1.0, 0.5, 0.5, -1.0],
    [-1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, -1.0],
    [-1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0],
    [-1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.5, -1.0],
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
];

const BLACK_ROOK: PositionTable = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.0],
];

const BLACK_QUEEN: PositionTable = [
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [-0.5, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [-0.5, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [-1.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [-1.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
];

const BLACK_KING: PositionTable = [
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-2.0, -3.0, -3.0, -4.0, -4.0, -3.0, -3.0, -2.0],
    [-1.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -1.0],
    [2.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 2.0],
    [2.0, 3.0, 1.0, 0.0, 0.0, 1.0, 3.0, 2.0],
];

const WHITE_PAWN: PositionTable = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.5, 1.0, 1.0, -2.0, -2.0, 1.0, 1.0, 0.5],
    [0.5, -0.5, -1.0, 0.0, 0.0, -1.0, -0.5, 0.5],
    [0.0, 0.0, 0.0, 2.0, 2.0, 0.0, 0.0, 0.0],
    [0.5, 0.5, 1.0, 2.5, 2.5, 1.0, 0.5, 0.5],
    [1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0],
    [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

const WHITE_KNIGHT: PositionTable = [
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
    [-4.0, -2.0, 0.0, 0.5, 0.5, 0.0, -2.0, -4.0],
    [-3.0, 0.5, 1.0, 1.5, 1.5, 1.0, 0.5, -3.0],
    [-3.0, 0.0, 1.5, 2.0, 2.0, 1.5, 0.0, -3.0],
    [-3.0, 0.5, 1.5, 2.0, 2.0, 1.5, 0.5, -3.0],
    [-3.0, 0.0, 1.0, 1.5, 1.5, 1.0, 0.0, -3.0],
    [-4.0, -2.0, 0.0, 0.0, 0.0, 0.0, -2.0, -4.0],
    [-5.0, -4.0, -3.0, -3.0, -3.0, -3.0, -4.0, -5.0],
];

const WHITE_BISHOP: PositionTable = [
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
    [-1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.5, -1.0],
    [-1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0],
    [-1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, -1.0],
    [-1.0, 0.5, 0.5, 1.0, 1.0, 0.5, 0.5, -1.0],
    [-1.0, 0.0, 0.5, 1.0, 1.0, 0.5, 0.0, -1.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -2.0],
];

const WHITE_ROOK: PositionTable = [
    [0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.0],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [-0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.5],
    [0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

const WHITE_QUEEN: PositionTable = [
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
    [-1.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-1.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [-0.5, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [-0.5, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -0.5],
    [-1.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.0, -1.0],
    [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    [-2.0, -1.0, -1.0, -0.5, -0.5, -1.0, -1.0, -2.0],
];

const WHITE_KING: PositionTable = [
    [2.0, 3.0, 1.0, 0.0, 0.0, 1.0, 3.0, 2.0],
    [2.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 2.0],
    [-1.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -1.0],
    [-2.0, -3.0, -3.0, -4.0, -4.0, -3.0, -3.0, -2.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
    [-3.0, -4.0, -4.0, -5.0, -5.0, -4.0, -4.0, -3.0],
];
