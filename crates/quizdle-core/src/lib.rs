//! Core crossword model for the Quizdle authoring tools.
//!
//! The crate covers the data path between the external layout service and a
//! finished upload: projecting placement lists onto an n x n character grid
//! (with conflict reporting), recovering word occurrences from a filled grid,
//! driving a manual editing session, paging over candidate layouts, and
//! assembling the upload document. The layout algorithm itself lives in the
//! remote service; nothing here computes a crossword.

mod editor;
mod extract;
mod grid;
mod layout;
mod placement;
mod project;
mod puzzle;

pub use editor::{ArrowKey, EditorSession};
pub use grid::{Direction, Grid, Position};
pub use layout::{CandidateSet, GridCandidate, LayoutResponse};
pub use placement::{Occurrence, Placement, PlacementError, MIN_WORD_LEN};
pub use project::Conflict;
pub use puzzle::{
    assemble_document, bind_positions, PuzzleDocument, PuzzleDraft, PuzzleError, CLUE_COUNT,
};
