mod board_ui;

pub use board_ui::TicTacToeBoardUi;
