mod board;
mod bot_controller;
mod game_state;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, CELL_COUNT};
pub use bot_controller::{SearchLimits, SelectMoveError, select_move, select_move_with_limits};
pub use game_state::{BOT_MARK, HUMAN_MARK, TicTacToeGameState};
pub use settings::{FirstPlayer, GameMode, TicTacToeSessionSettings};
pub use types::{Difficulty, Line, Mark, Outcome};
pub use win_detector::{LINES, evaluate, find_winning_line};
