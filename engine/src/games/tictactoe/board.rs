use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use super::types::Mark;

pub const CELL_COUNT: usize = 9;

/// 3x3 board, cells indexed 0..9 in row-major order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.cells.get(index) == Some(&Mark::Empty)
    }

    /// Empty cell indices, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.cells[i] == Mark::Empty).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), String> {
        if mark == Mark::Empty {
            return Err("Cannot place an empty mark".to_string());
        }
        match self.cells.get(index).copied() {
            None => Err(format!("Cell index {} is out of range", index)),
            Some(Mark::Empty) => {
                self.cells[index] = mark;
                Ok(())
            }
            Some(_) => Err(format!("Cell {} is already marked", index)),
        }
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }
}

impl Index<usize> for Board {
    type Output = Mark;

    fn index(&self, index: usize) -> &Mark {
        &self.cells[index]
    }
}

/// Parses nine cells written as `X`, `O` and `.` (or `_`); whitespace is ignored.
impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Mark::Empty; CELL_COUNT];
        let mut count = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            if count == CELL_COUNT {
                return Err(format!("Too many cells in board string: {:?}", s));
            }
            cells[count] = match ch {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '_' => Mark::Empty,
                other => return Err(format!("Unexpected board character {:?}", other)),
            };
            count += 1;
        }
        if count != CELL_COUNT {
            return Err(format!("Expected {} cells, got {}", CELL_COUNT, count));
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            writeln!(f, "{}{}{}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_cells(), (0..9).collect::<Vec<_>>());
        assert!(!board.is_full());
    }

    #[test]
    fn test_parse_board() {
        let board: Board = "OO. X.. ...".parse().unwrap();
        assert_eq!(board[0], Mark::O);
        assert_eq!(board[1], Mark::O);
        assert_eq!(board[3], Mark::X);
        assert_eq!(board.empty_cells(), vec![2, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!("XO".parse::<Board>().is_err());
        assert!("XOXOXOXOXO".parse::<Board>().is_err());
        assert!("XOXOXOXO?".parse::<Board>().is_err());
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_range() {
        let mut board = Board::new();
        board.place(4, Mark::X).unwrap();
        assert!(board.place(4, Mark::O).is_err());
        assert!(board.place(9, Mark::O).is_err());
        assert!(board.place(0, Mark::Empty).is_err());
        assert_eq!(board[4], Mark::X);
        assert!(!board.is_empty_at(4));
        assert!(!board.is_empty_at(42));
    }

    #[test]
    fn test_display_rows() {
        let board: Board = "XO. ... ..X".parse().unwrap();
        assert_eq!(board.to_string(), "XO.\n...\n..X\n");
    }
}
