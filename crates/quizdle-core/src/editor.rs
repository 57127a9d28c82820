//! Interactive grid editing session.

use crate::{Direction, Grid, Occurrence, Position};

/// Screen-direction cursor movement, independent of the typing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

/// One manual-editing session over one grid.
///
/// Owns the grid, the focused-cell pointer and the current typing direction;
/// nothing here is process-wide, so independent sessions do not interfere.
///
/// All focus movement saturates at the grid edge: typing past the last cell,
/// backspacing before the first, and arrow keys at a border keep the focus on
/// the edge cell instead of leaving the grid.
#[derive(Debug, Clone)]
pub struct EditorSession {
    grid: Grid,
    focus: Option<Position>,
    direction: Direction,
}

impl EditorSession {
    /// Start a session on an empty grid.
    pub fn new(size: usize) -> Self {
        Self::with_grid(Grid::new(size))
    }

    /// Start a session on an existing grid, e.g. a projected layout.
    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            focus: None,
            direction: Direction::Across,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn focus(&self) -> Option<Position> {
        self.focus
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Click on a cell: focus it, or toggle the typing direction if it is
    /// already the focused cell.
    pub fn click(&mut self, pos: Position) {
        assert!(self.grid.in_bounds(pos), "click outside the grid must use click_outside");
        if self.focus == Some(pos) {
            self.direction = self.direction.toggled();
        } else {
            self.focus = Some(pos);
        }
    }

    /// Click anywhere outside the grid: drop focus. Direction is kept.
    pub fn click_outside(&mut self) {
        self.focus = None;
    }

    /// Type a letter into the focused cell and advance along the typing
    /// direction. Returns whether the grid changed.
    pub fn type_letter(&mut self, ch: char) -> bool {
        if !ch.is_ascii_alphabetic() {
            return false;
        }
        let Some(pos) = self.focus else {
            return false;
        };

        self.grid.set(pos, ch.to_ascii_uppercase());
        self.focus = Some(match self.direction {
            Direction::Across => self.step(pos, 0, 1),
            Direction::Down => self.step(pos, 1, 0),
        });
        true
    }

    /// Backspace: clear the focused cell if it has content, otherwise step
    /// back against the typing direction and clear the cell landed on.
    pub fn backspace(&mut self) -> bool {
        let Some(pos) = self.focus else {
            return false;
        };

        if self.grid.get(pos).is_some() {
            self.grid.clear(pos);
        } else {
            let prev = match self.direction {
                Direction::Across => self.step(pos, 0, -1),
                Direction::Down => self.step(pos, -1, 0),
            };
            self.focus = Some(prev);
            self.grid.clear(prev);
        }
        true
    }

    /// Delete: clear the focused cell, focus unchanged.
    pub fn delete(&mut self) -> bool {
        let Some(pos) = self.focus else {
            return false;
        };
        let had_content = self.grid.get(pos).is_some();
        self.grid.clear(pos);
        had_content
    }

    /// Space re-selects the focused cell. Kept as a stub for a future
    /// direction-switch-without-toggle binding.
    pub fn space(&mut self) {
        if let Some(pos) = self.focus {
            self.focus = Some(pos);
        }
    }

    /// Move focus one cell in a screen direction.
    pub fn arrow(&mut self, key: ArrowKey) {
        let Some(pos) = self.focus else {
            return;
        };
        let next = match key {
            ArrowKey::Up => self.step(pos, -1, 0),
            ArrowKey::Down => self.step(pos, 1, 0),
            ArrowKey::Left => self.step(pos, 0, -1),
            ArrowKey::Right => self.step(pos, 0, 1),
        };
        self.focus = Some(next);
    }

    /// Words currently on the grid, for the live clue listing.
    pub fn occurrences(&self) -> Vec<Occurrence> {
        self.grid.occurrences()
    }

    fn step(&self, pos: Position, row_delta: i32, col_delta: i32) -> Position {
        let max = self.grid.size() as i32 - 1;
        Position::new(
            (pos.row as i32 + row_delta).clamp(0, max) as usize,
            (pos.col as i32 + col_delta).clamp(0, max) as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_focuses_then_toggles() {
        let mut session = EditorSession::new(6);
        assert_eq!(session.focus(), None);
        assert_eq!(session.direction(), Direction::Across);

        session.click(Position::new(2, 2));
        assert_eq!(session.focus(), Some(Position::new(2, 2)));
        assert_eq!(session.direction(), Direction::Across);

        session.click(Position::new(2, 2));
        assert_eq!(session.focus(), Some(Position::new(2, 2)));
        assert_eq!(session.direction(), Direction::Down);

        session.click(Position::new(0, 0));
        assert_eq!(session.focus(), Some(Position::new(0, 0)));
        assert_eq!(session.direction(), Direction::Down);
    }

    #[test]
    fn test_click_outside_clears_focus() {
        let mut session = EditorSession::new(6);
        session.click(Position::new(1, 1));
        session.click_outside();
        assert_eq!(session.focus(), None);

        // Typing with no focus is a no-op.
        assert!(!session.type_letter('a'));
        assert_eq!(session.grid().filled_count(), 0);
    }

    #[test]
    fn test_typing_advances_across() {
        let mut session = EditorSession::new(6);
        session.click(Position::new(2, 2));

        for ch in "dog".chars() {
            assert!(session.type_letter(ch));
        }

        assert_eq!(session.focus(), Some(Position::new(2, 5)));
        assert_eq!(session.grid().get(Position::new(2, 2)), Some('D'));
        assert_eq!(session.grid().get(Position::new(2, 3)), Some('O'));
        assert_eq!(session.grid().get(Position::new(2, 4)), Some('G'));
    }

    #[test]
    fn test_typing_advances_down() {
        let mut session = EditorSession::new(6);
        session.click(Position::new(1, 1));
        session.click(Position::new(1, 1)); // toggle to Down

        session.type_letter('u');
        session.type_letter('p');

        assert_eq!(session.grid().get(Position::new(1, 1)), Some('U'));
        assert_eq!(session.grid().get(Position::new(2, 1)), Some('P'));
        assert_eq!(session.focus(), Some(Position::new(3, 1)));
    }

    #[test]
    fn test_typing_clamps_at_edge() {
        let mut session = EditorSession::new(3);
        session.click(Position::new(0, 2));
        session.type_letter('a');
        // Advance from the last column saturates.
        assert_eq!(session.focus(), Some(Position::new(0, 2)));
        assert_eq!(session.grid().get(Position::new(0, 2)), Some('A'));
    }

    #[test]
    fn test_backspace_on_filled_cell_keeps_focus() {
        let mut session = EditorSession::new(6);
        session.click(Position::new(2, 2));
        session.type_letter('x');
        session.click(Position::new(2, 2));

        assert!(session.backspace());
        assert_eq!(session.grid().get(Position::new(2, 2)), None);
        assert_eq!(session.focus(), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_backspace_on_empty_cell_steps_back_and_clears() {
        let mut session = EditorSession::new(6);
        session.click(Position::new(2, 2));
        for ch in "dog".chars() {
            session.type_letter(ch);
        }
        // Focus now at (2, 5), an empty cell.
        assert!(session.backspace());
        assert_eq!(session.focus(), Some(Position::new(2, 4)));
        assert_eq!(session.grid().get(Position::new(2, 4)), None);
    }

    #[test]
    fn test_backspace_clears_previous_regardless_of_content() {
        let mut session = EditorSession::new(6);
        session.click(Position::new(2, 4));
        session.type_letter('z'); // focus moves to (2, 5), which stays empty
        session.backspace();
        assert_eq!(session.focus(), Some(Position::new(2, 4)));
        assert_eq!(session.grid().get(Position::new(2, 4)), None);
    }

    #[test]
    fn test_arrows_move_independently_of_direction() {
        let mut session = EditorSession::new(6);
        session.click(Position::new(2, 2));
        session.click(Position::new(2, 2)); // typing direction Down

        session.arrow(ArrowKey::Right);
        assert_eq!(session.focus(), Some(Position::new(2, 3)));
        session.arrow(ArrowKey::Up);
        assert_eq!(session.focus(), Some(Position::new(1, 3)));
        session.arrow(ArrowKey::Left);
        assert_eq!(session.focus(), Some(Position::new(1, 2)));
        session.arrow(ArrowKey::Down);
        assert_eq!(session.focus(), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_arrows_clamp_at_borders() {
        let mut session = EditorSession::new(3);
        session.click(Position::new(0, 0));
        session.arrow(ArrowKey::Up);
        session.arrow(ArrowKey::Left);
        assert_eq!(session.focus(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_delete_keeps_focus() {
        let mut session = EditorSession::new(6);
        session.click(Position::new(3, 3));
        session.type_letter('q');
        session.click(Position::new(3, 3));

        assert!(session.delete());
        assert_eq!(session.grid().get(Position::new(3, 3)), None);
        assert_eq!(session.focus(), Some(Position::new(3, 3)));

        // Deleting an already-empty cell changes nothing.
        assert!(!session.delete());
    }

    #[test]
    fn test_space_is_a_reselect_noop() {
        let mut session = EditorSession::new(6);
        session.click(Position::new(1, 2));
        session.space();
        assert_eq!(session.focus(), Some(Position::new(1, 2)));
        assert_eq!(session.direction(), Direction::Across);
    }

    #[test]
    fn test_occurrences_after_typing() {
        let mut session = EditorSession::new(5);
        session.click(Position::new(0, 0));
        for ch in "cat".chars() {
            session.type_letter(ch);
        }

        let words = session.occurrences();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "CAT");
        assert_eq!(words[0].direction, Direction::Across);
    }

    #[test]
    fn test_non_letter_keys_ignored() {
        let mut session = EditorSession::new(5);
        session.click(Position::new(0, 0));
        assert!(!session.type_letter('3'));
        assert!(!session.type_letter('!'));
        assert_eq!(session.focus(), Some(Position::new(0, 0)));
    }
}
