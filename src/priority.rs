//! Best-first search over any [`SearchState`].
//!
//! The queue does not hold states but [`SuccessorWindow`]s: lazy iterators
//! over the successors of an expanded state, ordered by the heuristic of the
//! successor each would yield next. Popping a window yields one successor and
//! advances the window, so a state with thousands of successors costs one
//! queue slot instead of thousands.

use crate::SearchState;
use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashSet, VecDeque},
};

/// Budgets for a [`PrioritySearch`] run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PriorityConfig {
    /// Hard cap on main loop iterations.
    pub max_iterations: usize,
    /// Number of successors a [`SuccessorWindow`] keeps between
    /// regenerations. Must be at least one.
    pub window: usize,
    /// Emit a progress log line every this many iterations. Zero disables
    /// progress logging.
    pub log_every: usize,
}

impl PriorityConfig {
    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the successor window size.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the progress log frequency.
    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            max_iterations: 25_000,
            window: 10,
            log_every: 1_000,
        }
    }
}

/// Lazy, batched iterator over the successors of a state, best heuristic
/// first.
///
/// Only `window` successors are held at any time. When they are used up the
/// complete successor list is generated and sorted again, and the next
/// `window` entries are kept. Successor generation must be deterministic for
/// the regenerated batches to line up.
pub struct SuccessorWindow<S> {
    state: S,
    window: usize,

    batch: VecDeque<S>,
    consumed: usize,
    exhausted: bool,
    pending: Option<S>,
}

impl<S> SuccessorWindow<S>
where
    S: SearchState,
{
    /// Create a new window over the successors of `state`.
    pub fn new(state: S, window: usize) -> Self {
        let mut successors = SuccessorWindow {
            state,
            window: window.max(1),
            batch: VecDeque::new(),
            consumed: 0,
            exhausted: false,
            pending: None,
        };
        successors.pending = successors.fetch();

        successors
    }

    /// The state whose successors are enumerated.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The successor the next call to `next` will return.
    pub fn peek(&self) -> Option<&S> {
        self.pending.as_ref()
    }

    fn fetch(&mut self) -> Option<S> {
        if self.batch.is_empty() {
            if self.exhausted {
                return None;
            }

            let mut all: Vec<S> = self.state.successors().collect();
            all.sort_by_key(S::heuristic);

            self.batch = all
                .into_iter()
                .skip(self.consumed)
                .take(self.window)
                .collect();
            if self.batch.len() < self.window {
                self.exhausted = true;
            }
        }

        let next = self.batch.pop_front()?;
        self.consumed += 1;

        Some(next)
    }
}

impl<S> Iterator for SuccessorWindow<S>
where
    S: SearchState,
{
    type Item = S;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.pending.take()?;
        self.pending = self.fetch();

        Some(next)
    }
}

/// A queue slot: a window keyed by its pending successor's heuristic, with an
/// insertion counter so that ties pop in FIFO order.
struct QueueEntry<S> {
    key: Reverse<(usize, u64)>,
    successors: SuccessorWindow<S>,
}

impl<S> PartialEq for QueueEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S> Eq for QueueEntry<S> {}

impl<S> PartialOrd for QueueEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for QueueEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Why a [`PrioritySearch`] run stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Termination {
    /// A terminal state was found. It is the first one found in expansion
    /// order, not necessarily the best terminal state.
    TerminalFound,
    /// The iteration budget ran out; the result is the best state seen.
    BudgetExhausted,
    /// Every reachable state was expanded without finding a terminal state;
    /// the result is the best state seen.
    QueueExhausted,
}

/// Outcome of a [`PrioritySearch`] run.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    /// The terminal state, or the lowest-heuristic state seen.
    pub state: S,
    /// Why the search stopped.
    pub termination: Termination,
    /// Number of main loop iterations performed.
    pub iterations: usize,
}

impl<S> SearchResult<S> {
    /// Return true if the search found a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.termination == Termination::TerminalFound
    }
}

/// Best-first search engine.
#[derive(Debug, Clone, Default)]
pub struct PrioritySearch {
    config: PriorityConfig,
}

impl PrioritySearch {
    /// Create a new engine with the given budgets.
    pub fn new(config: PriorityConfig) -> Self {
        PrioritySearch { config }
    }

    /// The budgets of this engine.
    pub fn config(&self) -> &PriorityConfig {
        &self.config
    }

    /// Search from `initial` until a terminal state is found or the budget
    /// runs out.
    pub fn search<S>(&self, initial: S) -> SearchResult<S>
    where
        S: SearchState + Clone,
    {
        if initial.is_terminal() {
            return SearchResult {
                state: initial,
                termination: Termination::TerminalFound,
                iterations: 0,
            };
        }

        let mut visited = HashSet::new();
        visited.insert(initial.identity());

        let mut best = initial.clone();
        let mut queue = BinaryHeap::new();
        let mut insertions: u64 = 0;

        let mut push = |queue: &mut BinaryHeap<QueueEntry<S>>, successors: SuccessorWindow<S>| {
            let Some(heuristic) = successors.peek().map(S::heuristic) else {
                return;
            };

            queue.push(QueueEntry {
                key: Reverse((heuristic, insertions)),
                successors,
            });
            insertions += 1;
        };

        push(&mut queue, SuccessorWindow::new(initial, self.config.window));

        let mut iterations = 0;
        while let Some(QueueEntry { mut successors, .. }) = queue.pop() {
            let Some(next) = successors.next() else {
                continue;
            };

            if next.is_terminal() {
                log::info!(
                    "Found terminal state after [{}] iterations with heuristic [{}].",
                    iterations,
                    next.heuristic()
                );
                return SearchResult {
                    state: next,
                    termination: Termination::TerminalFound,
                    iterations,
                };
            }

            if visited.insert(next.identity()) {
                push(
                    &mut queue,
                    SuccessorWindow::new(next.clone(), self.config.window),
                );
            }

            push(&mut queue, successors);

            if next.heuristic() < best.heuristic() {
                best = next;
            }

            if self.config.log_every > 0 && iterations % self.config.log_every == 0 {
                log::debug!(
                    "Iteration [{}/{}], queue size [{}], best heuristic [{}].",
                    iterations,
                    self.config.max_iterations,
                    queue.len(),
                    best.heuristic()
                );
            }

            iterations += 1;
            if iterations >= self.config.max_iterations {
                log::info!(
                    "Iteration budget [{}] exhausted, best heuristic [{}].",
                    self.config.max_iterations,
                    best.heuristic()
                );
                return SearchResult {
                    state: best,
                    termination: Termination::BudgetExhausted,
                    iterations,
                };
            }
        }

        log::info!(
            "Queue exhausted after [{}] iterations, best heuristic [{}].",
            iterations,
            best.heuristic()
        );
        SearchResult {
            state: best,
            termination: Termination::QueueExhausted,
            iterations,
        }
    }
}
