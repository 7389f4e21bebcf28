#![deny(missing_docs)]

//! Fill a crossword grid from ranked clue candidates.
//!
//! Every entry (word slot) of the grid comes with a list of candidate answers,
//! most likely first. The engines in this crate search for a letter assignment
//! that agrees at every crossing, while tolerating a bounded number of entries
//! whose candidates all turn out to be unusable ("excluded" entries).
//!
//! Two strategies are provided:
//!  - [`Backtracker`], a depth-first search over [`GridState`]s with an
//!    explicit stack, most-constrained-entry-first ordering, and a budget on
//!    the number of excluded entries.
//!  - [`PrioritySearch`], a best-first search over any [`SearchState`], used
//!    with [`CrosswordState`] for crosswords.
//!
//! Both are best-effort searches bounded by an iteration budget.

pub mod backtrack;
pub mod crossing;
pub mod crossword_state;
pub mod geometry;
pub mod grid_state;
pub mod priority;
pub mod puzzle;

pub use backtrack::{BacktrackConfig, BacktrackOutcome, Backtracker};
pub use crossing::{Crossing, CrossingGraph, EntryId};
pub use crossword_state::CrosswordState;
pub use geometry::{Direction, Entry, Geometry, GeometryError};
pub use grid_state::{Cell, GridState, Preview, Rejection, Slot};
pub use priority::{PriorityConfig, PrioritySearch, SearchResult, SuccessorWindow, Termination};
pub use puzzle::{CandidateSource, Puzzle};

/// A state that can be explored by [`PrioritySearch`].
pub trait SearchState: Sized {
    /// Content-based identity used to avoid expanding equivalent states
    /// twice.
    type Identity: core::hash::Hash + Eq;

    /// Return an iterator over every state reachable in one step.
    ///
    /// The sequence may be large; the engine only materializes a window of it
    /// at a time.
    fn successors(&self) -> Box<dyn Iterator<Item = Self> + '_>;

    /// Heuristic score of this state, lower is better.
    fn heuristic(&self) -> usize;

    /// Return true if this state is a final state that ends the search.
    fn is_terminal(&self) -> bool;

    /// Return the identity of this state.
    fn identity(&self) -> Self::Identity;
}
