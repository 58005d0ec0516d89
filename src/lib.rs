pub mod board;
pub mod evaluation;
pub mod game;
pub mod pieces;
pub mod rules;
pub mod search;

pub mod prelude {
    // Useful structs
    pub use crate::board::{Board, Coord, Square, StartPosition};
    pub use crate::game::{
        CastlingSide, Game, GameConfig, GameConfigBuilder, GameState, MoveOutcome, MoveRejection,
        PlayerKind, RunningState,
    };
    pub use crate::pieces::{Color, Piece, PieceKind};
    pub use crate::rules::PseudoMove;

    // Useful functions
    pub use crate::evaluation::evaluate;
    pub use crate::game::debug::print_board;
    pub use crate::search::best_move;
}
