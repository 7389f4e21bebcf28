//! Depth-first backtracking over [`GridState`]s.
//!
//! The search keeps an explicit stack of frames instead of recursing. A frame
//! is a state together with the entry chosen at that state and the position of
//! the next candidate to try, so that a frame pushed back onto the stack
//! resumes exactly where it left off.

use crate::{crossing::EntryId, grid_state::GridState};

/// Budgets for a [`Backtracker`] run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BacktrackConfig {
    /// Largest number of excluded entries a state may have. Placements that
    /// would exclude more entries are rejected.
    pub max_excluded: usize,
    /// Hard cap on stack pops.
    pub max_iterations: usize,
    /// Emit a progress log line every this many iterations. Zero disables
    /// progress logging.
    pub log_every: usize,
}

impl BacktrackConfig {
    /// Set the exclusion budget.
    pub fn with_max_excluded(mut self, max_excluded: usize) -> Self {
        self.max_excluded = max_excluded;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the progress log frequency.
    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}

impl Default for BacktrackConfig {
    fn default() -> Self {
        Self {
            max_excluded: 0,
            max_iterations: 100_000,
            log_every: 10_000,
        }
    }
}

/// Result of a [`Backtracker`] run.
#[derive(Debug, Copy, Clone)]
pub enum BacktrackOutcome<'a> {
    /// A filled grid, the first one found in search order.
    Solved(GridState<'a>),
    /// The iteration budget ran out. Holds the last state processed, which
    /// is generally not filled.
    BudgetExhausted(GridState<'a>),
    /// Every branch died within the exclusion budget.
    Unsolvable,
}

impl<'a> BacktrackOutcome<'a> {
    /// The resulting state, if any.
    pub fn state(&self) -> Option<&GridState<'a>> {
        match self {
            Self::Solved(state) | Self::BudgetExhausted(state) => Some(state),
            Self::Unsolvable => None,
        }
    }

    /// Return true if the outcome is a filled grid.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

#[derive(Debug)]
struct Frame<'a> {
    state: GridState<'a>,
    entry: Option<EntryId>,
    next_candidate: usize,
}

impl<'a> Frame<'a> {
    fn new(state: GridState<'a>) -> Self {
        Frame {
            state,
            entry: None,
            next_candidate: 0,
        }
    }
}

/// Depth-first fill engine.
#[derive(Debug, Clone, Default)]
pub struct Backtracker {
    config: BacktrackConfig,
}

impl Backtracker {
    /// Create a new engine with the given budgets.
    pub fn new(config: BacktrackConfig) -> Self {
        Backtracker { config }
    }

    /// The budgets of this engine.
    pub fn config(&self) -> &BacktrackConfig {
        &self.config
    }

    /// Search for a filled grid reachable from `initial`.
    ///
    /// At each state the unresolved entry with the fewest viable candidates
    /// is chosen, and its candidates are tried in ranked order. The first
    /// placement that keeps the state within the exclusion budget is followed
    /// immediately; if none does, the branch is abandoned.
    pub fn solve<'a>(&self, initial: GridState<'a>) -> BacktrackOutcome<'a> {
        self.solve_observed(initial, |_, _, _| {})
    }

    /// Like [`Backtracker::solve`], calling `on_trial` with the state, entry
    /// and candidate index of every placement attempted.
    fn solve_observed<'a>(
        &self,
        initial: GridState<'a>,
        mut on_trial: impl FnMut(&GridState<'a>, EntryId, usize),
    ) -> BacktrackOutcome<'a> {
        if initial.is_filled() {
            return BacktrackOutcome::Solved(initial);
        }
        if initial.num_excluded() > self.config.max_excluded {
            log::info!(
                "Initial state already has [{}] excluded entries, budget is [{}].",
                initial.num_excluded(),
                self.config.max_excluded
            );
            return BacktrackOutcome::Unsolvable;
        }

        let mut stack = vec![Frame::new(initial)];
        let mut iterations = 0;

        'frames: while let Some(frame) = stack.pop() {
            if iterations >= self.config.max_iterations {
                log::info!(
                    "Iteration budget [{}] exhausted with [{}] empty cells left.",
                    self.config.max_iterations,
                    frame.state.num_empty()
                );
                return BacktrackOutcome::BudgetExhausted(frame.state);
            }
            if self.config.log_every > 0 && iterations % self.config.log_every == 0 {
                log::debug!(
                    "Iteration [{}/{}], stack depth [{}], [{}] empty, [{}] excluded:\n{}",
                    iterations,
                    self.config.max_iterations,
                    stack.len(),
                    frame.state.num_empty(),
                    frame.state.num_excluded(),
                    frame.state
                );
            }
            iterations += 1;

            let Some(entry) = frame
                .entry
                .or_else(|| frame.state.most_constrained_entry())
            else {
                continue;
            };
            let remaining = frame.state.remaining(entry).unwrap_or_default();

            for (offset, &candidate) in remaining.iter().enumerate().skip(frame.next_candidate) {
                on_trial(&frame.state, entry, candidate);

                match frame.state.preview_candidate(entry, candidate) {
                    Ok(preview) if preview.num_excluded <= self.config.max_excluded => {}
                    Ok(_) => continue,
                    Err(rejection) => {
                        log::trace!("Candidate [{}] rejected: {}.", candidate, rejection);
                        continue;
                    }
                }
                let child = frame.state.apply_candidate(entry, candidate);

                if child.is_filled() {
                    log::info!(
                        "Filled grid after [{}] iterations with [{}] excluded entries.",
                        iterations,
                        child.num_excluded()
                    );
                    return BacktrackOutcome::Solved(child);
                }

                stack.push(Frame {
                    state: frame.state,
                    entry: Some(entry),
                    next_candidate: offset + 1,
                });
                stack.push(Frame::new(child));
                continue 'frames;
            }
        }

        log::info!("Search space exhausted after [{}] iterations.", iterations);
        BacktrackOutcome::Unsolvable
    }

    /// Search with exclusion budgets `0, 1, ..., max_excluded` in turn,
    /// returning the first filled grid found.
    ///
    /// The configured `max_excluded` is ignored. If no budget yields a filled
    /// grid and at least one run ran out of iterations, the partial state with
    /// the fewest empty cells is returned as
    /// [`BacktrackOutcome::BudgetExhausted`].
    pub fn solve_deepening<'a>(
        &self,
        initial: GridState<'a>,
        max_excluded: usize,
    ) -> BacktrackOutcome<'a> {
        let mut best_partial: Option<GridState<'a>> = None;

        for budget in 0..=max_excluded {
            log::debug!("Trying exclusion budget [{}].", budget);

            let engine = Backtracker::new(self.config.with_max_excluded(budget));
            match engine.solve(initial) {
                BacktrackOutcome::Solved(state) => return BacktrackOutcome::Solved(state),
                BacktrackOutcome::BudgetExhausted(state) => {
                    let improves = best_partial
                        .map_or(true, |best| state.num_empty() < best.num_empty());
                    if improves {
                        best_partial = Some(state);
                    }
                }
                BacktrackOutcome::Unsolvable => {}
            }
        }

        best_partial.map_or(
            BacktrackOutcome::Unsolvable,
            BacktrackOutcome::BudgetExhausted,
        )
    }
}
