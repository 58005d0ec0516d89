pub mod color;
pub mod piece;

pub use {
    color::Color,
    piece::{Piece, PieceKind, ALL_PIECE_KINDS, PROMOTE_PIECE},
};
