use super::board::Board;
use super::types::{Line, Mark, Outcome};

/// Rows, then columns, then diagonals. Scan order decides which line is
/// reported and which cell the heuristic bot picks first.
pub const LINES: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn find_winning_line(board: &Board) -> Option<(Mark, Line)> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        let mark = board[a];
        (mark != Mark::Empty && mark == board[b] && mark == board[c]).then_some((mark, line))
    })
}

/// Makes no assumption about mark counts, so it is safe on lookahead boards.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, line)) = find_winning_line(board) {
        return Outcome::Won { mark, line };
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
