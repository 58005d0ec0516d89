use crate::board::{Board, Coord, Square};
use crate::pieces::Color;
use crate::rules::{self, PseudoMove};
use crate::search;

use super::config::{GameConfig, PlayerKind};
use super::engine::{GameEngine, MoveRecord};
use super::game_state::{GameState, RunningState};
use super::move_results::{MoveOutcome, MoveRejection, MoveResult};
use super::player_move::PlayerMove;

/// The single entry point a presentation layer drives a game through: owns
/// the engine, the two players' kinds, the search depth, and the cached
/// terminal status so repeated `game_status()` calls after a quiet move
/// don't re-scan the board.
pub struct Game {
    engine: GameEngine,
    config: GameConfig,
    status: GameState,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Game {
            engine: GameEngine::new(config.preset),
            config,
            status: GameState::Running(RunningState::Normal),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Color {
        self.engine.turn()
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn get_square(&self, rank: i8, file: i8) -> Option<Square> {
        let coord = Coord::new(rank, file);
        self.engine
            .board()
            .get(coord)
            .map(|piece| Square { coord, piece })
    }

    /// Lazily lists the shape-legal (not necessarily check-safe) moves from
    /// a square, for a caller that wants to highlight candidates before
    /// committing to `try_human_move`.
    pub fn all_valid_moves_of_square(&self, coord: Coord) -> Vec<PseudoMove> {
        rules::all_valid_moves_of_square(self.engine.board(), coord).collect()
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.engine.last_move()
    }

    pub fn try_human_move(&mut self, player: Color, from: Coord, to: Coord) -> MoveResult {
        let result = self.engine.try_human_move(PlayerMove::normal(from, to), player);
        self.sync_status(&result);
        result
    }

    /// Runs the search at the configured depth and, if it finds a move,
    /// applies it for real. The search itself only ever explores and undoes
    /// moves on `engine`'s board, so by the time it returns the board is
    /// back where `try_human_move` would find it.
    pub fn computer_move(&mut self) -> MoveResult {
        let depth = self.config.depth;
        let found = search::best_move(&mut self.engine, depth).map(|(mv, _)| mv);
        let result = match found {
            Some(mv) => {
                let applied = self.engine.test_and_apply(mv);
                debug_assert!(
                    applied,
                    "the search only ever returns moves it already proved legal"
                );
                Ok(self.engine.status_after_move())
            }
            None => Err(MoveRejection::IllegalMove),
        };
        self.sync_status(&result);
        result
    }

    pub fn undo(&mut self) {
        self.engine.undo();
        self.clear_terminal_status();
    }

    pub fn double_undo(&mut self) {
        self.engine.double_undo(!self.config.either_player_is_computer());
        self.clear_terminal_status();
    }

    /// Recomputes and caches ACTIVE/CHECKMATE/STALEMATE for the player now
    /// to move, independent of whether a move was just applied.
    pub fn game_status(&mut self) -> GameState {
        let outcome = self.engine.status_after_move();
        self.status = outcome_to_state(outcome, self.engine.turn());
        self.status
    }

    pub fn player_kind(&self, color: Color) -> PlayerKind {
        match color {
            Color::White => self.config.white_player,
            Color::Black => self.config.black_player,
        }
    }

    fn sync_status(&mut self, result: &MoveResult) {
        if let Ok(outcome) = result {
            self.status = outcome_to_state(*outcome, self.engine.turn());
        }
    }

    fn clear_terminal_status(&mut self) {
        if matches!(self.status, GameState::Checkmate(_) | GameState::Stalemate) {
            self.status = GameState::Running(RunningState::Normal);
        }
    }
}

fn outcome_to_state(outcome: MoveOutcome, to_move: Color) -> GameState {
    match outcome {
        MoveOutcome::Ok | MoveOutcome::Promote => GameState::Running(RunningState::Normal),
        MoveOutcome::Check => GameState::Running(RunningState::Checked(to_move)),
        MoveOutcome::Checkmate => GameState::Checkmate(to_move),
        MoveOutcome::Stalemate => GameState::Stalemate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::StartPosition;

    fn config_with(preset: StartPosition) -> GameConfig {
        GameConfig {
            preset,
            ..GameConfig::default()
        }
    }

    #[test]
    fn fresh_game_is_active_and_white_to_move() {
        let mut game = Game::new(GameConfig::default());
        assert_eq!(game.current_player(), Color::White);
        assert_eq!(game.game_status(), GameState::Running(RunningState::Normal));
    }

    #[test]
    fn checkmate_preset_reports_checkmate() {
        let mut game = Game::new(config_with(StartPosition::Checkmate));
        let loser = game.current_player();
        assert_eq!(game.game_status(), GameState::Checkmate(loser));
    }

    #[test]
    fn stalemate_preset_reports_stalemate() {
        let mut game = Game::new(config_with(StartPosition::Stalemate));
        assert_eq!(game.game_status(), GameState::Stalemate);
    }

    #[test]
    fn undo_clears_terminal_status_even_without_a_prior_move() {
        let mut game = Game::new(config_with(StartPosition::Checkmate));
        game.game_status();
        game.undo();
        assert_eq!(game.status, GameState::Running(RunningState::Normal));
    }

    #[test]
    fn computer_move_applies_a_real_move_and_leaves_turn_consistent() {
        let mut game = Game::new(GameConfig {
            depth: 1,
            ..GameConfig::default()
        });
        let before = game.current_player();
        let result = game.computer_move();
        assert!(result.is_ok());
        assert_ne!(game.current_player(), before);
        assert!(game.last_move().is_some());
    }
}
