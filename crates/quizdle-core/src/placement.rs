use crate::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest run of letters that counts as a word.
pub const MIN_WORD_LEN: usize = 2;

/// A word's intended location in a grid, as supplied by the layout service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Placement {
    pub fn new(word: impl Into<String>, row: usize, col: usize, direction: Direction) -> Self {
        Self {
            word: word.into(),
            row,
            col,
            direction,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Position of the word's last character.
    pub fn end(&self) -> Position {
        self.direction.offset(self.start(), self.len().saturating_sub(1))
    }

    /// The `"row,col,D"` string the upload service expects.
    pub fn position_code(&self) -> String {
        format!("{},{},{}", self.row, self.col, self.direction.code())
    }

    /// Check the placement against a grid size. Empty words and words that
    /// would run past the grid edge are precondition violations; callers
    /// fail fast rather than write a partial word.
    pub fn validate(&self, grid_size: usize) -> Result<(), PlacementError> {
        if self.is_empty() {
            return Err(PlacementError::EmptyWord);
        }
        let end = self.end();
        if self.row >= grid_size || self.col >= grid_size || end.row >= grid_size || end.col >= grid_size {
            return Err(PlacementError::OutOfBounds {
                word: self.word.clone(),
                row: self.row,
                col: self.col,
                grid_size,
            });
        }
        Ok(())
    }
}

/// A word recovered by scanning a grid. Same shape as [`Placement`] but
/// produced rather than supplied, and always at least [`MIN_WORD_LEN`] long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Occurrence {
    /// The `"row,col,D"` string used when reporting extracted words.
    pub fn position_code(&self) -> String {
        format!("{},{},{}", self.row, self.col, self.direction.code())
    }
}

impl From<Occurrence> for Placement {
    fn from(occ: Occurrence) -> Self {
        Placement {
            word: occ.word,
            row: occ.row,
            col: occ.col,
            direction: occ.direction,
        }
    }
}

/// A placement that cannot be projected onto a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// The placement's word has no characters.
    EmptyWord,
    /// The word starts or ends outside the grid.
    OutOfBounds {
        word: String,
        row: usize,
        col: usize,
        grid_size: usize,
    },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWord => write!(f, "placement has an empty word"),
            Self::OutOfBounds {
                word,
                row,
                col,
                grid_size,
            } => write!(
                f,
                "word {:?} at ({}, {}) does not fit a {}x{} grid",
                word, row, col, grid_size, grid_size
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let json = r#"{"word":"CAT","row":2,"col":3,"direction":"A"}"#;
        let p: Placement = serde_json::from_str(json).unwrap();
        assert_eq!(p, Placement::new("CAT", 2, 3, Direction::Across));

        let back = serde_json::to_string(&p).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_down_direction_code() {
        let p: Placement = serde_json::from_str(r#"{"word":"DOG","row":0,"col":1,"direction":"D"}"#).unwrap();
        assert_eq!(p.direction, Direction::Down);
        assert_eq!(p.position_code(), "0,1,D");
    }

    #[test]
    fn test_end_position() {
        let across = Placement::new("CAT", 2, 3, Direction::Across);
        assert_eq!(across.end(), Position::new(2, 5));

        let down = Placement::new("CAT", 2, 3, Direction::Down);
        assert_eq!(down.end(), Position::new(4, 3));
    }

    #[test]
    fn test_validate_fits() {
        let p = Placement::new("QUIZ", 1, 1, Direction::Across);
        assert!(p.validate(5).is_ok());
        assert!(p.validate(4).is_err());
    }

    #[test]
    fn test_validate_empty_word() {
        let p = Placement::new("", 0, 0, Direction::Across);
        assert_eq!(p.validate(5), Err(PlacementError::EmptyWord));
    }

    #[test]
    fn test_validate_out_of_bounds_start() {
        let p = Placement::new("AB", 5, 0, Direction::Down);
        assert!(matches!(
            p.validate(5),
            Err(PlacementError::OutOfBounds { grid_size: 5, .. })
        ));
    }
}
