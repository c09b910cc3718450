use serde::{Deserialize, Serialize};

use super::types::Difficulty;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    VersusBot,
    PlayerVersusPlayer,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::VersusBot, GameMode::PlayerVersusPlayer];

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::VersusBot => "Player vs Bot",
            GameMode::PlayerVersusPlayer => "Player vs Player",
        }
    }
}

/// Who opens a game against the bot. Player-vs-player games always start with X.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayer {
    #[default]
    Player,
    Bot,
}

impl FirstPlayer {
    pub const ALL: [FirstPlayer; 2] = [FirstPlayer::Player, FirstPlayer::Bot];

    pub fn label(&self) -> &'static str {
        match self {
            FirstPlayer::Player => "Player first",
            FirstPlayer::Bot => "Bot first",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeSessionSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub first_player: FirstPlayer,
}
