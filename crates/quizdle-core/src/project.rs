//! Projection of placement lists onto a grid.

use crate::{Grid, Placement, PlacementError, Position};

/// A cell that was overwritten with a different character during projection.
///
/// Matching overwrites are the normal intersection case and are not recorded;
/// a mismatch means the upstream layout disagrees with itself about this cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub pos: Position,
    /// The character that was already in the cell.
    pub existing: char,
    /// The character that replaced it.
    pub written: char,
}

impl Grid {
    /// Write every placement's characters into the grid.
    ///
    /// All placements are validated before any cell is touched; a malformed
    /// placement fails the whole projection and leaves the grid unchanged.
    ///
    /// A write that disagrees with a non-empty cell is not fatal: the new
    /// character wins, a [`Conflict`] is recorded and a diagnostic is logged,
    /// and projection continues with the remaining placements. One conflict
    /// is reported per conflicting write.
    pub fn project(&mut self, placements: &[Placement]) -> Result<Vec<Conflict>, PlacementError> {
        for placement in placements {
            placement.validate(self.size())?;
        }

        let mut conflicts = Vec::new();
        for placement in placements {
            for (i, ch) in placement.word.chars().enumerate() {
                let pos = placement.direction.offset(placement.start(), i);
                match self.get(pos) {
                    Some(existing) if existing != ch => {
                        log::warn!("conflict (overwritten) in cell ({}, {})", pos.row, pos.col);
                        conflicts.push(Conflict {
                            pos,
                            existing,
                            written: ch,
                        });
                        self.set(pos, ch);
                    }
                    // Equal characters at an intersection are expected; silent.
                    Some(_) => {}
                    None => self.set(pos, ch),
                }
            }
        }
        Ok(conflicts)
    }
}
