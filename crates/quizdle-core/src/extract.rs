//! Recovery of word occurrences from a filled grid.

use crate::placement::MIN_WORD_LEN;
use crate::{Direction, Grid, Occurrence, Position};

/// Maximal runs of 2+ letters in a line of cells, as (start index, text).
///
/// A plain linear scan: each cell is either a letter (extends the current
/// run) or a delimiter (empty cells and any non-alphanumeric content).
fn letter_runs(line: impl Iterator<Item = Option<char>>) -> Vec<(usize, String)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut text = String::new();

    for (i, cell) in line.enumerate() {
        match cell {
            Some(ch) if ch.is_ascii_alphanumeric() => {
                if text.is_empty() {
                    start = i;
                }
                text.push(ch);
            }
            _ => {
                if text.chars().count() >= MIN_WORD_LEN {
                    runs.push((start, std::mem::take(&mut text)));
                } else {
                    text.clear();
                }
            }
        }
    }
    if text.chars().count() >= MIN_WORD_LEN {
        runs.push((start, text));
    }
    runs
}

impl Grid {
    /// Every maximal run of 2 or more letters in the grid.
    ///
    /// Rows are scanned first (Across occurrences, row 0 downwards, left to
    /// right), then columns (Down occurrences, column 0 rightwards, top to
    /// bottom). A run along a row and a run along a column may cover the same
    /// cells; both are reported. Single letters are never reported.
    pub fn occurrences(&self) -> Vec<Occurrence> {
        let n = self.size();
        let mut words = Vec::new();

        for row in 0..n {
            let line = (0..n).map(|col| self.get(Position::new(row, col)));
            for (start, text) in letter_runs(line) {
                words.push(Occurrence {
                    word: text,
                    row,
                    col: start,
                    direction: Direction::Across,
                });
            }
        }

        for col in 0..n {
            let line = (0..n).map(|row| self.get(Position::new(row, col)));
            for (start, text) in letter_runs(line) {
                words.push(Occurrence {
                    word: text,
                    row: start,
                    col,
                    direction: Direction::Down,
                });
            }
        }

        words
    }
}
