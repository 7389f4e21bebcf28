//! Grid geometry: dimensions, blocked cells and the word slots ("entries")
//! that run between them.
//!
//! Entries are derived the same way a puzzle file numbers its clues: every
//! maximal run of at least two open cells is an entry, across entries first in
//! reading order, then down entries in reading order.

use std::fmt;

/// Orientation of an entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left to right along a row.
    Across,
    /// Top to bottom along a column.
    Down,
}

impl Direction {
    /// Row and column step between consecutive cells of an entry.
    pub fn step(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// A single across or down word slot.
///
/// An entry is identified by its direction and origin cell, and has a fixed
/// length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entry {
    /// Orientation of the slot.
    pub direction: Direction,
    /// Row of the first cell.
    pub row: usize,
    /// Column of the first cell.
    pub column: usize,
    /// Number of cells in the slot.
    pub length: usize,
}

impl Entry {
    /// Create an across entry starting at `(row, column)`.
    pub fn across(row: usize, column: usize, length: usize) -> Self {
        Entry {
            direction: Direction::Across,
            row,
            column,
            length,
        }
    }

    /// Create a down entry starting at `(row, column)`.
    pub fn down(row: usize, column: usize, length: usize) -> Self {
        Entry {
            direction: Direction::Down,
            row,
            column,
            length,
        }
    }

    /// Return an iterator over the `(row, column)` coordinates covered by this
    /// entry, in word order.
    pub fn coordinates(self) -> impl Iterator<Item = (usize, usize)> {
        let (row_step, column_step) = self.direction.step();

        (0..self.length).map(move |pos| (self.row + pos * row_step, self.column + pos * column_step))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.direction {
            Direction::Across => 'A',
            Direction::Down => 'D',
        };

        write!(f, "{}({},{})", letter, self.row, self.column)
    }
}

/// Grid dimensions together with the blocked-cell mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

impl Geometry {
    /// Create a geometry from its dimensions and a row-major blocked mask.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MaskSize`] if the mask does not have exactly
    /// `width * height` cells.
    pub fn new(width: usize, height: usize, blocked: Vec<bool>) -> Result<Self, GeometryError> {
        if blocked.len() != width * height {
            return Err(GeometryError::MaskSize {
                expected: width * height,
                actual: blocked.len(),
            });
        }

        Ok(Geometry {
            width,
            height,
            blocked,
        })
    }

    /// Create a geometry with no blocked cells.
    pub fn open(width: usize, height: usize) -> Self {
        Geometry {
            width,
            height,
            blocked: vec![false; width * height],
        }
    }

    /// Parse a geometry from row strings.
    ///
    /// `.` and `#` denote blocked cells, any other character is an open cell.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::RaggedRow`] if the rows differ in length.
    pub fn from_rows<'r>(rows: impl IntoIterator<Item = &'r str>) -> Result<Self, GeometryError> {
        let mut width = None;
        let mut height = 0;
        let mut blocked = Vec::new();

        for (row, line) in rows.into_iter().enumerate() {
            let cells: Vec<bool> = line.chars().map(|c| c == '.' || c == '#').collect();
            match width {
                None => width = Some(cells.len()),
                Some(width) if width != cells.len() => {
                    return Err(GeometryError::RaggedRow {
                        row,
                        expected: width,
                        actual: cells.len(),
                    });
                }
                Some(_) => {}
            }

            blocked.extend(cells);
            height += 1;
        }

        Self::new(width.unwrap_or(0), height, blocked)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells, blocked or open.
    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of the given cell.
    #[inline]
    pub fn to_index(&self, row: usize, column: usize) -> usize {
        row * self.width + column
    }

    /// Return true if the cell at the given row-major index is blocked.
    pub fn is_blocked(&self, index: usize) -> bool {
        self.blocked[index]
    }

    fn is_open(&self, row: usize, column: usize) -> bool {
        !self.blocked[self.to_index(row, column)]
    }

    /// Derive the entries of this grid.
    ///
    /// Every maximal run of two or more open cells becomes an entry. Across
    /// entries come first in reading order, followed by down entries in
    /// reading order.
    pub fn entries(&self) -> Vec<Entry> {
        let mut entries = Vec::new();

        for row in 0..self.height {
            let mut column = 0;
            while column < self.width {
                if !self.is_open(row, column) {
                    column += 1;
                    continue;
                }

                let start = column;
                while column < self.width && self.is_open(row, column) {
                    column += 1;
                }
                if column - start >= 2 {
                    entries.push(Entry::across(row, start, column - start));
                }
            }
        }

        let mut downs = Vec::new();
        for column in 0..self.width {
            let mut row = 0;
            while row < self.height {
                if !self.is_open(row, column) {
                    row += 1;
                    continue;
                }

                let start = row;
                while row < self.height && self.is_open(row, column) {
                    row += 1;
                }
                if row - start >= 2 {
                    downs.push(Entry::down(start, column, row - start));
                }
            }
        }
        downs.sort_by_key(|entry| (entry.row, entry.column));
        entries.extend(downs);

        entries
    }
}

/// Malformed grid geometry, detected before any search begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The blocked mask does not match the grid dimensions.
    MaskSize {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied mask.
        actual: usize,
    },
    /// A row string has a different length from the first row.
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// An entry has no cells.
    EmptyEntry(Entry),
    /// An entry runs past the edge of the grid.
    OutOfBounds(Entry),
    /// An entry covers a blocked cell.
    BlockedCell {
        /// The offending entry.
        entry: Entry,
        /// Row of the blocked cell.
        row: usize,
        /// Column of the blocked cell.
        column: usize,
    },
    /// A cell is owned by more than one across and one down entry.
    OverOwnedCell {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        column: usize,
        /// Number of entries covering the cell.
        owners: usize,
    },
    /// Two entries of the same direction share a cell.
    ParallelOverlap {
        /// The first entry covering the cell.
        first: Entry,
        /// The second entry covering the cell.
        second: Entry,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaskSize { expected, actual } => {
                write!(f, "blocked mask has {actual} cells, expected {expected}")
            }
            Self::RaggedRow {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has {actual} cells, expected {expected}"),
            Self::EmptyEntry(entry) => write!(f, "entry {entry} has length zero"),
            Self::OutOfBounds(entry) => write!(f, "entry {entry} runs past the edge of the grid"),
            Self::BlockedCell { entry, row, column } => {
                write!(f, "entry {entry} covers blocked cell ({row},{column})")
            }
            Self::OverOwnedCell {
                row,
                column,
                owners,
            } => write!(f, "cell ({row},{column}) is owned by {owners} entries"),
            Self::ParallelOverlap { first, second } => {
                write!(f, "entries {first} and {second} overlap in the same direction")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
