//! Crossings between across and down entries.
//!
//! The graph is built once from the geometry and a list of entries, and is
//! read-only afterwards. For each entry it records the row-major cell index of
//! every position, and the list of crossing partners used to filter candidate
//! lists when a word is placed.

use crate::geometry::{Entry, Geometry, GeometryError};

/// Index of an entry inside of a [`CrossingGraph`] (and a
/// [`Puzzle`](crate::Puzzle)).
pub type EntryId = usize;

/// One side of a grid cell shared by an across and a down entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Crossing {
    /// The entry crossing this one.
    pub partner: EntryId,
    /// Position of the shared cell inside of this entry.
    pub position: usize,
    /// Position of the shared cell inside of the partner entry.
    pub partner_position: usize,
}

/// Cells and crossings of every entry of a grid.
#[derive(Debug, Clone)]
pub struct CrossingGraph {
    cells: Vec<Vec<usize>>,
    crossings: Vec<Vec<Crossing>>,
}

impl CrossingGraph {
    /// Build the crossing graph for the given entries.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if an entry is empty, leaves the grid or
    /// covers a blocked cell, or if any cell is owned by anything other than
    /// at most one across and one down entry.
    pub fn build(geometry: &Geometry, entries: &[Entry]) -> Result<Self, GeometryError> {
        let mut owners: Vec<Vec<(EntryId, usize)>> = vec![Vec::new(); geometry.num_cells()];
        let mut cells = Vec::with_capacity(entries.len());

        for (entry_id, entry) in entries.iter().enumerate() {
            if entry.length == 0 {
                return Err(GeometryError::EmptyEntry(*entry));
            }

            let mut entry_cells = Vec::with_capacity(entry.length);
            for (position, (row, column)) in entry.coordinates().enumerate() {
                if row >= geometry.height() || column >= geometry.width() {
                    return Err(GeometryError::OutOfBounds(*entry));
                }

                let index = geometry.to_index(row, column);
                if geometry.is_blocked(index) {
                    return Err(GeometryError::BlockedCell {
                        entry: *entry,
                        row,
                        column,
                    });
                }

                owners[index].push((entry_id, position));
                entry_cells.push(index);
            }
            cells.push(entry_cells);
        }

        let mut crossings = vec![Vec::new(); entries.len()];
        for (index, cell_owners) in owners.iter().enumerate() {
            match cell_owners.as_slice() {
                [] | [_] => {}
                [(first, first_pos), (second, second_pos)] => {
                    if entries[*first].direction == entries[*second].direction {
                        return Err(GeometryError::ParallelOverlap {
                            first: entries[*first],
                            second: entries[*second],
                        });
                    }

                    crossings[*first].push(Crossing {
                        partner: *second,
                        position: *first_pos,
                        partner_position: *second_pos,
                    });
                    crossings[*second].push(Crossing {
                        partner: *first,
                        position: *second_pos,
                        partner_position: *first_pos,
                    });
                }
                _ => {
                    return Err(GeometryError::OverOwnedCell {
                        row: index / geometry.width(),
                        column: index % geometry.width(),
                        owners: cell_owners.len(),
                    });
                }
            }
        }

        Ok(CrossingGraph { cells, crossings })
    }

    /// Number of entries in the graph.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Return true if the graph has no entries.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major cell indices of the given entry, in word order.
    pub fn cells(&self, entry: EntryId) -> &[usize] {
        &self.cells[entry]
    }

    /// Crossings of the given entry, ordered by cell index.
    pub fn crossings(&self, entry: EntryId) -> &[Crossing] {
        &self.crossings[entry]
    }
}
