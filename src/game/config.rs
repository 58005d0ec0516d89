use derive_builder::Builder;

use crate::board::StartPosition;

/// Which side drives a player's moves: a human submitting squares through
/// the facade, or the search choosing on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// Assembled once per game and handed to [`Game::new`](super::facade::Game::new).
/// Every field defaults, so [`GameConfigBuilder::default().build()`] always
/// succeeds; `Default` for `GameConfig` just does that and unwraps.
#[derive(Debug, Clone, Copy, Builder)]
pub struct GameConfig {
    #[builder(default = "PlayerKind::Human")]
    pub white_player: PlayerKind,
    #[builder(default = "PlayerKind::Human")]
    pub black_player: PlayerKind,
    /// Plies the search looks ahead. 1 means "evaluate each of its own
    /// replies and stop".
    #[builder(default = "1")]
    pub depth: u32,
    #[builder(default = "StartPosition::Normal")]
    pub preset: StartPosition,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfigBuilder::default()
            .build()
            .expect("every GameConfig field carries a builder default")
    }
}

impl GameConfig {
    pub fn either_player_is_computer(&self) -> bool {
        self.white_player == PlayerKind::Computer || self.black_player == PlayerKind::Computer
    }
}
