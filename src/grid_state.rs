//! Immutable snapshots of a partially filled grid.
//!
//! A [`GridState`] owns nothing: its cells, its slot table and any filtered
//! candidate lists are slices allocated in a caller-supplied [`Bump`] arena.
//! Deriving a child with [`GridState::place`] copies the cell and slot tables
//! into fresh arena slices and shares every unchanged candidate list with the
//! parent, so the parent is never altered.

use crate::{crossing::EntryId, puzzle::Puzzle};
use bumpalo::Bump;
use std::fmt;

/// Content of a single grid cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    /// A black square.
    Blocked,
    /// An open cell with no letter yet.
    Empty,
    /// An open cell holding a letter.
    Letter(char),
}

/// Per-entry bookkeeping inside of a [`GridState`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Slot<'a> {
    /// The entry is unresolved; these candidate indices (into
    /// [`Puzzle::candidates`]) are still consistent with every crossing, in
    /// ranked order.
    Viable(&'a [usize]),
    /// A word has been placed in the entry.
    Resolved,
    /// Every candidate of the entry was eliminated by crossings, or the entry
    /// never had any.
    Excluded,
}

/// Reason a word could not be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The word does not have the length of the entry.
    LengthMismatch {
        /// Length of the entry.
        expected: usize,
        /// Length of the word.
        actual: usize,
    },
    /// A cell of the entry already holds a different letter.
    Conflict {
        /// Position inside of the entry.
        position: usize,
        /// Letter already in the grid.
        existing: char,
        /// Letter of the rejected word.
        proposed: char,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "word has length {actual}, entry has length {expected}")
            }
            Self::Conflict {
                position,
                existing,
                proposed,
            } => write!(
                f,
                "letter {proposed:?} conflicts with {existing:?} at position {position}"
            ),
        }
    }
}

impl std::error::Error for Rejection {}

/// Counters of the state a placement would produce.
///
/// Returned by [`GridState::preview_candidate`], which computes them without
/// allocating the derived state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Open cells still without a letter after the placement.
    pub num_empty: usize,
    /// Excluded entries after the placement.
    pub num_excluded: usize,
}

/// A snapshot of a partial fill.
#[derive(Copy, Clone)]
pub struct GridState<'a> {
    puzzle: &'a Puzzle,
    arena: &'a Bump,

    cells: &'a [Cell],
    slots: &'a [Slot<'a>],
    num_excluded: usize,
    num_empty: usize,
}

impl<'a> GridState<'a> {
    pub(crate) fn initial(puzzle: &'a Puzzle, arena: &'a Bump) -> Self {
        let geometry = puzzle.geometry();
        let cells: &'a [Cell] = arena.alloc_slice_fill_with(geometry.num_cells(), |index| {
            if geometry.is_blocked(index) {
                Cell::Blocked
            } else {
                Cell::Empty
            }
        });
        let num_empty = cells.iter().filter(|cell| **cell == Cell::Empty).count();

        let mut num_excluded = 0;
        let slots: Vec<Slot<'a>> = (0..puzzle.entries().len())
            .map(|entry| match puzzle.candidates(entry).len() {
                0 => {
                    log::debug!(
                        "Entry [{}] has no candidates, excluding it up front.",
                        puzzle.entries()[entry]
                    );
                    num_excluded += 1;
                    Slot::Excluded
                }
                count => Slot::Viable(arena.alloc_slice_fill_iter(0..count)),
            })
            .collect();

        GridState {
            puzzle,
            arena,
            cells,
            slots: arena.alloc_slice_copy(&slots),
            num_excluded,
            num_empty,
        }
    }

    /// The puzzle this state belongs to.
    pub fn puzzle(&self) -> &'a Puzzle {
        self.puzzle
    }

    /// Place `word` into `entry`, returning the derived state.
    ///
    /// Every crossing partner of `entry` keeps only the candidates agreeing
    /// with the placed letter. A partner that loses its last candidate is
    /// excluded.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the word has the wrong length or disagrees
    /// with a letter already in the grid. `self` is unchanged either way.
    pub fn place(&self, word: &str, entry: EntryId) -> Result<GridState<'a>, Rejection> {
        let letters: Vec<char> = word.chars().collect();

        self.place_letters(&letters, entry)
    }

    /// Place the candidate with index `candidate` (into
    /// [`Puzzle::candidates`]) into `entry`.
    ///
    /// # Errors
    ///
    /// See [`GridState::place`].
    pub fn place_candidate(
        &self,
        entry: EntryId,
        candidate: usize,
    ) -> Result<GridState<'a>, Rejection> {
        let puzzle = self.puzzle;

        self.place_letters(&puzzle.candidates(entry)[candidate], entry)
    }

    /// Compute the counters of the state [`GridState::place_candidate`] would
    /// produce, without allocating anything in the arena.
    ///
    /// # Errors
    ///
    /// See [`GridState::place`].
    pub fn preview_candidate(&self, entry: EntryId, candidate: usize) -> Result<Preview, Rejection> {
        let letters = &self.puzzle.candidates(entry)[candidate];
        self.check_letters(letters, entry)?;

        let newly_filled = self
            .puzzle
            .cells(entry)
            .iter()
            .filter(|&&index| self.cells[index] == Cell::Empty)
            .count();
        let newly_excluded = self
            .puzzle
            .crossings(entry)
            .iter()
            .filter(|crossing| {
                let Slot::Viable(viable) = self.slots[crossing.partner] else {
                    return false;
                };

                let letter = letters[crossing.position];
                let partner_candidates = self.puzzle.candidates(crossing.partner);
                !viable.iter().any(|&candidate| {
                    partner_candidates[candidate][crossing.partner_position] == letter
                })
            })
            .count();

        Ok(Preview {
            num_empty: self.num_empty - newly_filled,
            num_excluded: self.num_excluded + newly_excluded,
        })
    }

    /// Place a candidate already accepted by
    /// [`GridState::preview_candidate`].
    pub(crate) fn apply_candidate(&self, entry: EntryId, candidate: usize) -> GridState<'a> {
        let puzzle = self.puzzle;

        self.apply_letters(&puzzle.candidates(entry)[candidate], entry)
    }

    fn check_letters(&self, letters: &[char], entry: EntryId) -> Result<(), Rejection> {
        let entry_cells = self.puzzle.cells(entry);
        if letters.len() != entry_cells.len() {
            return Err(Rejection::LengthMismatch {
                expected: entry_cells.len(),
                actual: letters.len(),
            });
        }

        for (position, (&index, &proposed)) in entry_cells.iter().zip(letters).enumerate() {
            if let Cell::Letter(existing) = self.cells[index] {
                if existing != proposed {
                    return Err(Rejection::Conflict {
                        position,
                        existing,
                        proposed,
                    });
                }
            }
        }

        Ok(())
    }

    fn place_letters(&self, letters: &[char], entry: EntryId) -> Result<GridState<'a>, Rejection> {
        self.check_letters(letters, entry)?;

        Ok(self.apply_letters(letters, entry))
    }

    fn apply_letters(&self, letters: &[char], entry: EntryId) -> GridState<'a> {
        let entry_cells = self.puzzle.cells(entry);
        let cells = self.arena.alloc_slice_copy(self.cells);
        let mut num_empty = self.num_empty;
        for (&index, &letter) in entry_cells.iter().zip(letters) {
            if cells[index] == Cell::Empty {
                num_empty -= 1;
            }
            cells[index] = Cell::Letter(letter);
        }

        let slots = self.arena.alloc_slice_copy(self.slots);
        if let Slot::Viable(_) = slots[entry] {
            slots[entry] = Slot::Resolved;
        }

        let mut num_excluded = self.num_excluded;
        for crossing in self.puzzle.crossings(entry) {
            let Slot::Viable(viable) = slots[crossing.partner] else {
                continue;
            };

            let letter = letters[crossing.position];
            let partner_candidates = self.puzzle.candidates(crossing.partner);
            let kept: Vec<usize> = viable
                .iter()
                .copied()
                .filter(|&candidate| {
                    partner_candidates[candidate][crossing.partner_position] == letter
                })
                .collect();

            if kept.is_empty() {
                log::trace!(
                    "Placing in [{}] excludes crossing entry [{}].",
                    self.puzzle.entries()[entry],
                    self.puzzle.entries()[crossing.partner]
                );
                slots[crossing.partner] = Slot::Excluded;
                num_excluded += 1;
            } else if kept.len() < viable.len() {
                slots[crossing.partner] = Slot::Viable(self.arena.alloc_slice_copy(&kept));
            }
        }

        GridState {
            puzzle: self.puzzle,
            arena: self.arena,
            cells,
            slots,
            num_excluded,
            num_empty,
        }
    }

    /// Number of entries excluded so far.
    pub fn num_excluded(&self) -> usize {
        self.num_excluded
    }

    /// Number of open cells without a letter.
    pub fn num_empty(&self) -> usize {
        self.num_empty
    }

    /// Return true if every open cell holds a letter.
    pub fn is_filled(&self) -> bool {
        self.num_empty == 0
    }

    /// Row-major cell contents.
    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    /// Content of the cell at `(row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[self.puzzle.geometry().to_index(row, column)]
    }

    /// Bookkeeping for a single entry.
    pub fn slot(&self, entry: EntryId) -> Slot<'a> {
        self.slots[entry]
    }

    /// Still-viable candidate indices of an unresolved entry, in ranked
    /// order. Returns `None` for resolved and excluded entries.
    pub fn remaining(&self, entry: EntryId) -> Option<&'a [usize]> {
        match self.slots[entry] {
            Slot::Viable(viable) => Some(viable),
            Slot::Resolved | Slot::Excluded => None,
        }
    }

    /// Return an iterator over the unresolved entries and their viable
    /// candidate indices.
    pub fn unresolved(&self) -> impl Iterator<Item = (EntryId, &'a [usize])> + 'a {
        let slots = self.slots;

        slots
            .iter()
            .enumerate()
            .filter_map(|(entry, slot)| match slot {
                Slot::Viable(viable) => Some((entry, *viable)),
                Slot::Resolved | Slot::Excluded => None,
            })
    }

    /// Return an iterator over the excluded entries.
    pub fn excluded_entries(&self) -> impl Iterator<Item = EntryId> + 'a {
        let slots = self.slots;

        slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| **slot == Slot::Excluded)
            .map(|(entry, _)| entry)
    }

    /// The unresolved entry with the fewest viable candidates.
    ///
    /// Ties go to the lowest entry id.
    pub fn most_constrained_entry(&self) -> Option<EntryId> {
        self.unresolved()
            .min_by_key(|(entry, viable)| (viable.len(), *entry))
            .map(|(entry, _)| entry)
    }

    /// All unresolved entries, fewest viable candidates first.
    pub fn entries_by_constraint(&self) -> Vec<EntryId> {
        let mut entries: Vec<_> = self.unresolved().collect();
        entries.sort_by_key(|(entry, viable)| (viable.len(), *entry));

        entries.into_iter().map(|(entry, _)| entry).collect()
    }

    /// Current content of an entry, `-` standing in for empty cells.
    pub fn entry_text(&self, entry: EntryId) -> String {
        self.puzzle
            .cells(entry)
            .iter()
            .map(|&index| match self.cells[index] {
                Cell::Letter(letter) => letter,
                Cell::Empty | Cell::Blocked => '-',
            })
            .collect()
    }

    /// One string per grid row: `#` for blocked cells, `-` for empty cells,
    /// upper-cased letters otherwise.
    pub fn rows(&self) -> Vec<String> {
        let width = self.puzzle.geometry().width();
        if width == 0 {
            return Vec::new();
        }

        self.cells
            .chunks(width)
            .map(|row| {
                row.iter()
                    .flat_map(|cell| match cell {
                        Cell::Blocked => '#'.to_uppercase(),
                        Cell::Empty => '-'.to_uppercase(),
                        Cell::Letter(letter) => letter.to_uppercase(),
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for GridState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for GridState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridState")
            .field("rows", &self.rows())
            .field("num_empty", &self.num_empty)
            .field("num_excluded", &self.num_excluded)
            .finish()
    }
}
