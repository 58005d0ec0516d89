pub mod generator;
pub mod validator;

pub use generator::{all_moves, all_valid_moves_of_square, PseudoMove};
pub use validator::is_valid_move;
