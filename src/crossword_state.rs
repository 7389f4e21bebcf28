//! [`SearchState`] implementation for crossword grids.

use crate::{
    crossing::EntryId,
    grid_state::{Cell, GridState},
    SearchState,
};
use std::{cell::OnceCell, fmt};

/// A [`GridState`] as seen by [`PrioritySearch`](crate::PrioritySearch).
///
/// The heuristic is `num_empty + excluded_weight * num_excluded`, trading
/// filled letters against entries abandoned by the candidate source. Two
/// states are the same state when their grids hold the same letters,
/// regardless of how they were reached.
///
/// Successors are produced unplaced: a successor knows its parent, its
/// placement and its counters (from [`GridState::preview_candidate`]), and
/// only writes its grid into the arena the first time the grid is needed.
/// Ranking a large successor list therefore allocates nothing.
#[derive(Debug, Clone)]
pub struct CrosswordState<'a> {
    parent: GridState<'a>,
    placement: Option<(EntryId, usize)>,
    num_empty: usize,
    num_excluded: usize,
    grid: OnceCell<GridState<'a>>,
    excluded_weight: usize,
}

impl<'a> CrosswordState<'a> {
    /// Default weight of an excluded entry, in empty cells.
    pub const DEFAULT_EXCLUDED_WEIGHT: usize = 2;

    /// Wrap a grid state with the default exclusion weight.
    pub fn new(grid: GridState<'a>) -> Self {
        CrosswordState {
            parent: grid,
            placement: None,
            num_empty: grid.num_empty(),
            num_excluded: grid.num_excluded(),
            grid: OnceCell::from(grid),
            excluded_weight: Self::DEFAULT_EXCLUDED_WEIGHT,
        }
    }

    /// Set the weight of an excluded entry.
    pub fn with_excluded_weight(mut self, excluded_weight: usize) -> Self {
        self.excluded_weight = excluded_weight;
        self
    }

    /// The wrapped grid state, placed in the arena on first access.
    pub fn grid(&self) -> &GridState<'a> {
        self.grid.get_or_init(|| match self.placement {
            Some((entry, candidate)) => self.parent.apply_candidate(entry, candidate),
            None => self.parent,
        })
    }

    /// Unwrap the grid state.
    pub fn into_grid(self) -> GridState<'a> {
        *self.grid()
    }

    /// Return true if the grid has already been written into the arena.
    pub fn is_placed(&self) -> bool {
        self.grid.get().is_some()
    }
}

impl<'a> SearchState for CrosswordState<'a> {
    type Identity = &'a [Cell];

    fn successors(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        let grid = *self.grid();
        let excluded_weight = self.excluded_weight;

        Box::new(
            grid.entries_by_constraint()
                .into_iter()
                .flat_map(move |entry| {
                    grid.remaining(entry)
                        .unwrap_or_default()
                        .iter()
                        .filter_map(move |&candidate| {
                            let preview = grid.preview_candidate(entry, candidate).ok()?;

                            Some(CrosswordState {
                                parent: grid,
                                placement: Some((entry, candidate)),
                                num_empty: preview.num_empty,
                                num_excluded: preview.num_excluded,
                                grid: OnceCell::new(),
                                excluded_weight,
                            })
                        })
                }),
        )
    }

    fn heuristic(&self) -> usize {
        self.num_empty
            .saturating_add(self.excluded_weight.saturating_mul(self.num_excluded))
    }

    fn is_terminal(&self) -> bool {
        self.num_empty == 0
    }

    fn identity(&self) -> &'a [Cell] {
        self.grid().cells()
    }
}

impl fmt::Display for CrosswordState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid())?;
        writeln!(f, "heuristic: {}", self.heuristic())
    }
}
