use std::fmt;

use crate::games::SessionRng;
use crate::{debug_log, log};
use super::board::{Board, CELL_COUNT};
use super::types::{Difficulty, Mark, Outcome};
use super::win_detector::{LINES, evaluate};

const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMoveError {
    /// The board is full.
    NoEmptyCells,
    /// A line is already complete.
    GameOver(Mark),
    InvalidMover,
}

impl fmt::Display for SelectMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectMoveError::NoEmptyCells => write!(f, "No valid move exists: the board is full"),
            SelectMoveError::GameOver(mark) => {
                write!(f, "No valid move exists: {} has already won", mark)
            }
            SelectMoveError::InvalidMover => write!(f, "The mover must be X or O"),
        }
    }
}

impl std::error::Error for SelectMoveError {}

/// Caps the optimal search. When the cap is hit the heuristic strategy is used
/// instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_nodes: Option<u64>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self { max_nodes: None }
    }

    pub fn with_max_nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }
}

pub fn select_move(
    board: &Board,
    mover: Mark,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> Result<usize, SelectMoveError> {
    select_move_with_limits(board, mover, difficulty, rng, SearchLimits::unbounded())
}

pub fn select_move_with_limits(
    board: &Board,
    mover: Mark,
    difficulty: Difficulty,
    rng: &mut SessionRng,
    limits: SearchLimits,
) -> Result<usize, SelectMoveError> {
    check_preconditions(board, mover)?;

    let index = match difficulty {
        Difficulty::Random => calculate_random_move(board, rng),
        Difficulty::Heuristic => calculate_heuristic_move(board, mover, rng),
        Difficulty::Optimal => calculate_minimax_move(board, mover, limits).or_else(|| {
            log!(
                "Search budget of {:?} nodes exhausted, using heuristic move",
                limits.max_nodes
            );
            calculate_heuristic_move(board, mover, rng)
        }),
    }
    .ok_or(SelectMoveError::NoEmptyCells)?;

    debug_assert!(board.is_empty_at(index), "selected occupied cell {}", index);
    Ok(index)
}

fn check_preconditions(board: &Board, mover: Mark) -> Result<(), SelectMoveError> {
    if mover == Mark::Empty {
        return Err(SelectMoveError::InvalidMover);
    }
    match evaluate(board) {
        Outcome::InProgress => Ok(()),
        Outcome::Won { mark, .. } => Err(SelectMoveError::GameOver(mark)),
        Outcome::Draw => Err(SelectMoveError::NoEmptyCells),
    }
}

fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    rng.choose(&board.empty_cells()).copied()
}

fn calculate_heuristic_move(board: &Board, mover: Mark, rng: &mut SessionRng) -> Option<usize> {
    let opponent = mover.opponent()?;
    find_completing_move(board, mover)
        .or_else(|| find_completing_move(board, opponent))
        .or_else(|| calculate_random_move(board, rng))
}

/// First line, in table order, where `mark` holds two cells and the third is
/// empty. Pairs are tried as (a, b), (a, c), (b, c).
fn find_completing_move(board: &Board, mark: Mark) -> Option<usize> {
    for [a, b, c] in LINES {
        if board[a] == mark && board[b] == mark && board[c] == Mark::Empty {
            return Some(c);
        }
        if board[a] == mark && board[c] == mark && board[b] == Mark::Empty {
            return Some(b);
        }
        if board[b] == mark && board[c] == mark && board[a] == Mark::Empty {
            return Some(a);
        }
    }
    None
}

fn calculate_minimax_move(board: &Board, mover: Mark, limits: SearchLimits) -> Option<usize> {
    let mut minimax = Minimax::new(mover, limits)?;
    let mut scratch = *board;
    let mut best: Option<(usize, i32)> = None;

    for index in board.empty_cells() {
        let mut placed = PlacedMark::new(&mut scratch, index, mover);
        let score = minimax.search(placed.board(), 0, false)?;
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    if let Some((index, score)) = best {
        debug_log!(
            "Minimax for {} picked cell {} (score {}, {} nodes)",
            mover,
            index,
            score,
            minimax.nodes
        );
    }
    best.map(|(index, _)| index)
}

/// Writes a mark on creation and clears it again on drop, so every exit from
/// a search frame leaves the board as it was.
struct PlacedMark<'a> {
    board: &'a mut Board,
    index: usize,
}

impl<'a> PlacedMark<'a> {
    fn new(board: &'a mut Board, index: usize, mark: Mark) -> Self {
        board.set(index, mark);
        Self { board, index }
    }

    fn board(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for PlacedMark<'_> {
    fn drop(&mut self) {
        self.board.set(self.index, Mark::Empty);
    }
}

/// Exhaustive minimax without pruning.
struct Minimax {
    maximizer: Mark,
    minimizer: Mark,
    nodes: u64,
    max_nodes: Option<u64>,
}

impl Minimax {
    fn new(maximizer: Mark, limits: SearchLimits) -> Option<Self> {
        Some(Self {
            maximizer,
            minimizer: maximizer.opponent()?,
            nodes: 0,
            max_nodes: limits.max_nodes,
        })
    }

    /// Score of a terminal board, `None` while the game is still open.
    fn score(&self, board: &Board, depth: u32) -> Option<i32> {
        let depth = depth as i32;
        match evaluate(board) {
            Outcome::Won { mark, .. } if mark == self.maximizer => Some(WIN_SCORE - depth),
            Outcome::Won { .. } => Some(depth - WIN_SCORE),
            Outcome::Draw => Some(0),
            Outcome::InProgress => None,
        }
    }

    /// Returns `None` once the node budget is spent.
    fn search(&mut self, board: &mut Board, depth: u32, maximizing: bool) -> Option<i32> {
        self.nodes += 1;
        if self.max_nodes.is_some_and(|max| self.nodes > max) {
            return None;
        }

        if let Some(score) = self.score(board, depth) {
            return Some(score);
        }

        let mark = if maximizing {
            self.maximizer
        } else {
            self.minimizer
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for index in 0..CELL_COUNT {
            if !board.is_empty_at(index) {
                continue;
            }
            let mut placed = PlacedMark::new(board, index, mark);
            let score = self.search(placed.board(), depth + 1, !maximizing)?;
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        Some(best)
    }
}
