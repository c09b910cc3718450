use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::bot_controller::select_move;
use super::settings::{FirstPlayer, GameMode, TicTacToeSessionSettings};
use super::types::{Difficulty, Line, Mark, Outcome};
use super::win_detector::evaluate;

pub const HUMAN_MARK: Mark = Mark::X;
pub const BOT_MARK: Mark = Mark::O;

/// Authoritative board and turn order for one game. The decision engine only
/// ever sees copies of `board`.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_mark: Mark,
    pub outcome: Outcome,
    pub settings: TicTacToeSessionSettings,
    pub last_move: Option<usize>,
}

impl TicTacToeGameState {
    pub fn new(settings: TicTacToeSessionSettings) -> Self {
        Self {
            board: Board::new(),
            current_mark: Self::opening_mark(&settings),
            outcome: Outcome::InProgress,
            settings,
            last_move: None,
        }
    }

    fn opening_mark(settings: &TicTacToeSessionSettings) -> Mark {
        match (settings.mode, settings.first_player) {
            (GameMode::VersusBot, FirstPlayer::Bot) => BOT_MARK,
            _ => HUMAN_MARK,
        }
    }

    pub fn restart(&mut self) {
        *self = Self::new(self.settings);
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.settings.mode = mode;
        self.restart();
    }

    pub fn set_first_player(&mut self, first_player: FirstPlayer) {
        self.settings.first_player = first_player;
        self.restart();
    }

    /// Takes effect from the bot's next move; the game keeps going.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn winning_line(&self) -> Option<Line> {
        match self.outcome {
            Outcome::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    pub fn is_bot_turn(&self) -> bool {
        self.settings.mode == GameMode::VersusBot
            && self.current_mark == BOT_MARK
            && !self.is_over()
    }

    /// A click from a human. Rejected while the bot is due to move.
    pub fn player_move(&mut self, index: usize) -> Result<(), String> {
        if self.is_bot_turn() {
            return Err("Wait for the bot to move".to_string());
        }
        self.place_mark(index)
    }

    fn place_mark(&mut self, index: usize) -> Result<(), String> {
        if self.is_over() {
            return Err("Game is already over".to_string());
        }

        self.board.place(index, self.current_mark)?;
        self.last_move = Some(index);
        self.outcome = evaluate(&self.board);

        if !self.is_over() {
            self.switch_turn();
        }
        Ok(())
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    pub fn bot_move(&mut self, rng: &mut SessionRng) -> Result<usize, String> {
        if !self.is_bot_turn() {
            return Err("Not the bot's turn".to_string());
        }

        let index = select_move(
            &self.board,
            self.current_mark,
            self.settings.difficulty,
            rng,
        )
        .map_err(|e| e.to_string())?;

        self.place_mark(index)?;
        log!(
            "Bot ({}) played {} at cell {}",
            self.settings.difficulty,
            BOT_MARK,
            index
        );
        Ok(index)
    }

    pub fn status_text(&self) -> String {
        match self.outcome {
            Outcome::Won { mark, .. } => format!("{} wins!", mark),
            Outcome::Draw => "Draw!".to_string(),
            Outcome::InProgress if self.is_bot_turn() && self.last_move.is_none() => {
                format!("Bot ({}) starts...", self.settings.difficulty)
            }
            Outcome::InProgress if self.is_bot_turn() => {
                format!("Bot ({}) is thinking...", self.settings.difficulty)
            }
            Outcome::InProgress => format!("{}'s turn", self.current_mark),
        }
    }
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new(TicTacToeSessionSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(
        mode: GameMode,
        difficulty: Difficulty,
        first_player: FirstPlayer,
    ) -> TicTacToeSessionSettings {
        TicTacToeSessionSettings {
            mode,
            difficulty,
            first_player,
        }
    }

    #[test]
    fn test_human_opens_by_default() {
        let state = TicTacToeGameState::default();
        assert_eq!(state.current_mark, Mark::X);
        assert!(!state.is_bot_turn());
        assert_eq!(state.status_text(), "X's turn");
    }

    #[test]
    fn test_bot_opens_when_configured() {
        let state = TicTacToeGameState::new(settings(
            GameMode::VersusBot,
            Difficulty::Optimal,
            FirstPlayer::Bot,
        ));
        assert_eq!(state.current_mark, Mark::O);
        assert!(state.is_bot_turn());
        assert_eq!(state.status_text(), "Bot (hard) starts...");
    }

    #[test]
    fn test_first_player_is_ignored_in_pvp() {
        let state = TicTacToeGameState::new(settings(
            GameMode::PlayerVersusPlayer,
            Difficulty::Random,
            FirstPlayer::Bot,
        ));
        assert_eq!(state.current_mark, Mark::X);
        assert!(!state.is_bot_turn());
    }

    #[test]
    fn test_player_move_alternates_and_rejects_occupied() {
        let mut state = TicTacToeGameState::new(settings(
            GameMode::PlayerVersusPlayer,
            Difficulty::Random,
            FirstPlayer::Player,
        ));
        state.player_move(4).unwrap();
        assert_eq!(state.current_mark, Mark::O);
        assert!(state.player_move(4).is_err());
        assert_eq!(state.current_mark, Mark::O);
        state.player_move(0).unwrap();
        assert_eq!(state.board[0], Mark::O);
        assert_eq!(state.last_move, Some(0));
        assert_eq!(state.status_text(), "X's turn");
    }

    #[test]
    fn test_win_stops_the_game() {
        let mut state = TicTacToeGameState::new(settings(
            GameMode::PlayerVersusPlayer,
            Difficulty::Random,
            FirstPlayer::Player,
        ));
        for index in [0, 3, 1, 4, 2] {
            state.player_move(index).unwrap();
        }
        assert_eq!(state.outcome, Outcome::Won { mark: Mark::X, line: [0, 1, 2] });
        assert_eq!(state.winning_line(), Some([0, 1, 2]));
        assert_eq!(state.status_text(), "X wins!");
        assert_eq!(state.current_mark, Mark::X);
        assert!(state.player_move(8).is_err());
    }

    #[test]
    fn test_draw_is_reported() {
        let mut state = TicTacToeGameState::new(settings(
            GameMode::PlayerVersusPlayer,
            Difficulty::Random,
            FirstPlayer::Player,
        ));
        // X O X / X X O / O X O
        for index in [0, 1, 2, 5, 3, 6, 4, 8, 7] {
            state.player_move(index).unwrap();
        }
        assert_eq!(state.outcome, Outcome::Draw);
        assert_eq!(state.status_text(), "Draw!");
    }

    #[test]
    fn test_bot_move_answers_human() {
        let mut rng = SessionRng::new(17);
        let mut state = TicTacToeGameState::new(settings(
            GameMode::VersusBot,
            Difficulty::Heuristic,
            FirstPlayer::Player,
        ));
        assert!(state.bot_move(&mut rng).is_err());

        state.player_move(0).unwrap();
        assert_eq!(state.status_text(), "Bot (medium) is thinking...");
        state.player_move(4).unwrap_err();
        let reply = state.bot_move(&mut rng).unwrap();
        assert_ne!(reply, 0);
        assert_eq!(state.board[reply], BOT_MARK);
        assert_eq!(state.current_mark, HUMAN_MARK);
    }

    #[test]
    fn test_bot_vs_bot_driver_reaches_end() {
        let mut rng = SessionRng::new(99);
        let mut state = TicTacToeGameState::new(settings(
            GameMode::VersusBot,
            Difficulty::Optimal,
            FirstPlayer::Player,
        ));
        while !state.is_over() {
            if state.is_bot_turn() {
                state.bot_move(&mut rng).unwrap();
            } else {
                let index = state.board.empty_cells()[0];
                state.player_move(index).unwrap();
            }
        }
        assert_ne!(state.outcome.winner(), Some(HUMAN_MARK));
    }

    #[test]
    fn test_changing_mode_restarts_but_difficulty_does_not() {
        let mut state = TicTacToeGameState::default();
        state.player_move(4).unwrap();

        state.set_difficulty(Difficulty::Random);
        assert_eq!(state.board[4], Mark::X);
        assert_eq!(state.settings.difficulty, Difficulty::Random);

        state.set_mode(GameMode::PlayerVersusPlayer);
        assert_eq!(state.board, Board::new());
        assert_eq!(state.settings.difficulty, Difficulty::Random);

        state.set_mode(GameMode::VersusBot);
        state.set_first_player(FirstPlayer::Bot);
        assert!(state.is_bot_turn());
    }
}
