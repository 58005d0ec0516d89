use crate::board::Board;
use crate::pieces::PieceKind;
use crate::rules;

use super::values;

/// Static evaluation of a position: material, piece-square position bonus,
/// and mobility for the four piece kinds whose mobility the source scores
/// (pawns and kings are never scored). Positive favors white, negative
/// favors black. The mid-game/end-game mobility split flips the moment the
/// board has no queens left, regardless of which side's queen vanished
/// first.
pub fn evaluate(board: &Board) -> f32 {
    let end_game = board.queen_count() == 0;
    let mut score = 0.0;
    for (coord, piece) in board.occupied_squares() {
        score += piece.material_value() as f32;
        score += values::position_value(piece.kind, piece.color, coord.rank, coord.file);
        if matches!(
            piece.kind,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        ) {
            let mobility = rules::all_valid_moves_of_square(board, coord).count();
            score += piece.color.sign() * values::mobility_value(piece.kind, mobility, end_game);
        }
    }
    round_to_three_places(score)
}

fn round_to_three_places(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::StartPosition;

    #[test]
    fn normal_starting_position_is_balanced() {
        let board = StartPosition::Normal.build();
        assert_eq!(evaluate(&board), 0.0);
    }

    #[test]
    fn evaluate_is_pure() {
        let board = StartPosition::Check.build();
        assert_eq!(evaluate(&board), evaluate(&board));
    }

    #[test]
    fn missing_queens_reach_end_game_mobility_tables() {
        let board = StartPosition::EndGameEvaluation.build();
        // Just exercises the end-game branch without panicking on a
        // mobility-table overshoot; exact value isn't asserted since both
        // sides are symmetric and it should still balance to zero.
        assert_eq!(evaluate(&board), 0.0);
    }
}
