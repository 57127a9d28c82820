//! Candidate layouts returned by the layout service, and paging over them.

use crate::{Conflict, Grid, Placement, PlacementError};
use serde::{Deserialize, Serialize};

/// One candidate layout: a grid size plus the clue placements to project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCandidate {
    pub grid_size: usize,
    pub clues: Vec<Placement>,
}

impl GridCandidate {
    /// Project the candidate onto a fresh grid.
    ///
    /// Conflicts indicate the layout service disagreed with itself; they are
    /// returned for display rather than treated as failure.
    pub fn realize(&self) -> Result<(Grid, Vec<Conflict>), PlacementError> {
        let mut grid = Grid::new(self.grid_size);
        let conflicts = grid.project(&self.clues)?;
        Ok((grid, conflicts))
    }
}

/// The layout service's response: either candidate grids or reported errors,
/// possibly with warnings alongside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutResponse {
    #[serde(default)]
    pub grids: Vec<GridCandidate>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl LayoutResponse {
    /// Service-reported errors joined for display, if any.
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.join(", "))
        }
    }
}

/// An ordered set of fetched candidates plus the paging cursor.
///
/// Replaced wholesale on each successful generation; paging saturates at
/// both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet {
    grids: Vec<GridCandidate>,
    #[serde(rename = "grid_index")]
    index: usize,
}

impl CandidateSet {
    pub fn new(grids: Vec<GridCandidate>) -> Self {
        Self { grids, index: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&GridCandidate> {
        self.grids.get(self.index)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.grids.is_empty() || self.index == self.grids.len() - 1
    }

    /// Advance to the next candidate. Returns false at the end.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            false
        } else {
            self.index += 1;
            true
        }
    }

    /// Step back to the previous candidate. Returns false at the start.
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            false
        } else {
            self.index -= 1;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn candidate(word: &str) -> GridCandidate {
        GridCandidate {
            grid_size: 5,
            clues: vec![Placement::new(word, 0, 0, Direction::Across)],
        }
    }

    #[test]
    fn test_response_wire_shape() {
        let json = r#"{
            "grids": [
                {"grid_size": 5, "clues": [{"word": "CAT", "row": 0, "col": 0, "direction": "A"}]}
            ]
        }"#;
        let response: LayoutResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.grids.len(), 1);
        assert_eq!(response.grids[0].grid_size, 5);
        assert!(response.error_message().is_none());
    }

    #[test]
    fn test_response_errors_joined() {
        let json = r#"{"errors": ["too few words", "word too long"]}"#;
        let response: LayoutResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.error_message().as_deref(),
            Some("too few words, word too long")
        );
        assert!(response.grids.is_empty());
    }

    #[test]
    fn test_realize_projects_clues() {
        let (grid, conflicts) = candidate("CAT").realize().unwrap();
        assert_eq!(grid.size(), 5);
        assert_eq!(grid.filled_count(), 3);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_paging_saturates() {
        let mut set = CandidateSet::new(vec![candidate("AB"), candidate("CD"), candidate("EF")]);
        assert!(set.is_first());
        assert!(!set.is_last());

        assert!(set.next());
        assert!(set.next());
        assert!(set.is_last());
        assert!(!set.next());
        assert_eq!(set.index(), 2);
        assert_eq!(set.current().unwrap().clues[0].word, "EF");

        assert!(set.prev());
        assert!(set.prev());
        assert!(set.is_first());
        assert!(!set.prev());
        assert_eq!(set.index(), 0);
    }

    #[test]
    fn test_empty_set() {
        let mut set = CandidateSet::default();
        assert!(set.is_empty());
        assert!(set.current().is_none());
        assert!(set.is_first() && set.is_last());
        assert!(!set.next());
        assert!(!set.prev());
    }

    #[test]
    fn test_single_candidate_is_first_and_last() {
        let set = CandidateSet::new(vec![candidate("AB")]);
        assert!(set.is_first());
        assert!(set.is_last());
    }
}
