use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate in a grid. Cells have no identity beyond their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Reading/typing direction of a word in the grid.
///
/// Serialized with the single-letter codes the layout and upload services use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "A")]
    Across,
    #[serde(rename = "D")]
    Down,
}

impl Direction {
    /// The other direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// Single-letter wire code.
    pub fn code(self) -> char {
        match self {
            Direction::Across => 'A',
            Direction::Down => 'D',
        }
    }

    /// Position of the `i`-th character of a word starting at `start`.
    /// Across advances the column, Down advances the row.
    pub fn offset(self, start: Position, i: usize) -> Position {
        match self {
            Direction::Across => Position::new(start.row, start.col + i),
            Direction::Down => Position::new(start.row + i, start.col),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An n x n character grid. Each cell holds either nothing or one character;
/// empty is an explicit state, never a placeholder character.
///
/// The size is fixed for the grid's lifetime. All positions handed to the
/// accessors must satisfy `row < size` and `col < size`; out-of-range access
/// is a caller error and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    /// Create an empty grid of the given size.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "position ({}, {}) out of range for {}x{} grid",
            pos.row,
            pos.col,
            self.size,
            self.size
        );
        pos.row * self.size + pos.col
    }

    /// Read a cell's content.
    pub fn get(&self, pos: Position) -> Option<char> {
        self.cells[self.index(pos)]
    }

    /// Write a character into a cell, replacing whatever was there.
    pub fn set(&mut self, pos: Position, ch: char) {
        let idx = self.index(pos);
        self.cells[idx] = Some(ch);
    }

    /// Clear a cell back to empty.
    pub fn clear(&mut self, pos: Position) {
        let idx = self.index(pos);
        self.cells[idx] = None;
    }

    /// Number of cells holding a character.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.filled_count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = self.get(Position::new(row, col)).unwrap_or('.');
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(5);
        assert_eq!(grid.size(), 5);
        assert_eq!(grid.filled_count(), 0);
        assert_eq!(grid.empty_count(), 25);
        assert_eq!(grid.get(Position::new(2, 3)), None);
    }

    #[test]
    fn test_set_get_clear() {
        let mut grid = Grid::new(5);
        grid.set(Position::new(1, 2), 'Q');
        assert_eq!(grid.get(Position::new(1, 2)), Some('Q'));
        assert_eq!(grid.filled_count(), 1);

        grid.clear(Position::new(1, 2));
        assert_eq!(grid.get(Position::new(1, 2)), None);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        let grid = Grid::new(5);
        grid.get(Position::new(5, 0));
    }

    #[test]
    fn test_direction_offset() {
        let start = Position::new(2, 3);
        assert_eq!(Direction::Across.offset(start, 2), Position::new(2, 5));
        assert_eq!(Direction::Down.offset(start, 2), Position::new(4, 3));
        assert_eq!(Direction::Across.offset(start, 0), start);
    }

    #[test]
    fn test_direction_toggle_and_code() {
        assert_eq!(Direction::Across.toggled(), Direction::Down);
        assert_eq!(Direction::Down.toggled(), Direction::Across);
        assert_eq!(Direction::Across.code(), 'A');
        assert_eq!(Direction::Down.code(), 'D');
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::new(3);
        grid.set(Position::new(0, 0), 'C');
        grid.set(Position::new(0, 1), 'A');
        grid.set(Position::new(0, 2), 'T');
        let text = grid.to_string();
        assert!(text.starts_with("C A T\n"));
        assert!(text.contains(". . ."));
    }
}
