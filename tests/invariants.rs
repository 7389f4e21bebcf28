mod common;

use bumpalo::Bump;
use common::{assert_consistent, init_logging, two_by_two, two_letter_tangle, word_square, Recording};
use crossfill::{
    BacktrackConfig, Backtracker, Cell, CrosswordState, Entry, Geometry, GridState,
    PriorityConfig, PrioritySearch, Puzzle, SearchState, Slot, Termination,
};
use std::{
    collections::{HashSet, VecDeque},
    mem::size_of,
};

/// Check everything a single placement is allowed to change.
fn assert_refines(parent: &GridState<'_>, child: &GridState<'_>) {
    for (before, after) in parent.cells().iter().zip(child.cells()) {
        match before {
            Cell::Empty => {}
            _ => assert_eq!(before, after, "a filled cell changed"),
        }
    }

    assert!(child.num_excluded() >= parent.num_excluded());
    assert!(child.num_empty() <= parent.num_empty());

    for entry in 0..parent.puzzle().entries().len() {
        match (parent.slot(entry), child.slot(entry)) {
            (Slot::Viable(before), Slot::Viable(after)) => {
                assert!(after.iter().all(|candidate| before.contains(candidate)));
                assert!(!after.is_empty());
            }
            (Slot::Viable(_), _) => {}
            (before, after) => assert_eq!(before, after, "a settled slot changed"),
        }
    }
}

/// Walk every state reachable through successor generation.
fn walk(puzzle: &Puzzle) -> usize {
    let arena = Bump::new();
    let initial = CrosswordState::new(puzzle.initial_state(&arena));

    let mut seen = HashSet::new();
    seen.insert(initial.identity());
    let mut queue = VecDeque::from([initial]);

    while let Some(state) = queue.pop_front() {
        assert_consistent(state.grid());
        let excluded = state.grid().excluded_entries().count();
        assert_eq!(excluded, state.grid().num_excluded());

        for child in state.successors() {
            assert_refines(state.grid(), child.grid());
            if seen.insert(child.identity()) {
                queue.push_back(child);
            }
        }
    }

    seen.len()
}

#[test]
fn reachable_states_only_refine_two_by_two() {
    init_logging();

    assert!(walk(&two_by_two()) > 1);
}

#[test]
fn reachable_states_only_refine_tangle() {
    init_logging();

    assert!(walk(&two_letter_tangle()) > 1);
}

#[test]
fn priority_search_expands_each_grid_once() {
    init_logging();

    let puzzle = two_letter_tangle();
    let arena = Bump::new();
    let initial = Recording::new(CrosswordState::new(puzzle.initial_state(&arena)));
    let expanded = initial.expanded.clone();

    let result = PrioritySearch::new(PriorityConfig::default().with_window(1_000)).search(initial);
    assert!(result.is_terminal());

    let expanded = expanded.borrow();
    let unique: HashSet<_> = expanded.iter().collect();
    assert_eq!(unique.len(), expanded.len());
}

#[test]
fn tangle_has_a_single_clean_fill() {
    init_logging();

    let puzzle = two_letter_tangle();
    let arena = Bump::new();

    let outcome = Backtracker::default().solve(puzzle.initial_state(&arena));

    let state = outcome.state().unwrap();
    assert!(outcome.is_solved());
    assert_eq!(state.rows(), vec!["ABA", "BAA", "BBB"]);
    assert_eq!(state.num_excluded(), 0);
}

#[test]
fn searches_stop_within_their_budgets() {
    init_logging();

    let puzzle = word_square();
    let arena = Bump::new();
    let initial = puzzle.initial_state(&arena);

    for max_iterations in 1..4 {
        let outcome = Backtracker::new(
            BacktrackConfig::default()
                .with_max_iterations(max_iterations)
                .with_log_every(1),
        )
        .solve(initial);
        assert!(outcome.state().is_some());

        let result = PrioritySearch::new(
            PriorityConfig::default()
                .with_max_iterations(max_iterations)
                .with_log_every(1),
        )
        .search(CrosswordState::new(initial));
        assert!(result.iterations <= max_iterations);
    }
}

/// A 5x5 grid whose bottom-left cell is only reachable through the first down
/// entry, which has no candidates, so it can never be filled. Every other
/// entry gets `per_entry` words over a three letter alphabet.
fn unfillable_lattice(per_entry: usize) -> Puzzle {
    let geometry = Geometry::from_rows(["-----", "-----", "-----", "-----", "-####"]).unwrap();
    let source = |entry: &Entry| -> Vec<String> {
        if *entry == Entry::down(0, 0, 5) {
            return Vec::new();
        }

        (0..per_entry)
            .map(|mut index| {
                (0..entry.length)
                    .map(|_| {
                        let letter = ['A', 'B', 'C'][index % 3];
                        index /= 3;
                        letter
                    })
                    .collect()
            })
            .collect()
    };

    Puzzle::from_source(geometry, &source).unwrap()
}

/// Bytes in use in a fresh arena after a priority search of `iterations`.
fn arena_bytes_after(puzzle: &Puzzle, iterations: usize) -> usize {
    let mut arena = Bump::new();
    {
        let initial = CrosswordState::new(puzzle.initial_state(&arena));
        let result = PrioritySearch::new(PriorityConfig::default().with_max_iterations(iterations))
            .search(initial);
        assert_eq!(result.termination, Termination::BudgetExhausted);
    }

    arena.iter_allocated_chunks().map(|chunk| chunk.len()).sum()
}

#[test]
fn priority_search_arena_grows_by_one_grid_per_iteration() {
    init_logging();

    let per_entry = 60;
    let puzzle = unfillable_lattice(per_entry);
    let entries = puzzle.entries().len();

    // Each iteration may write one derived grid: its cells, its slot table and
    // at worst one filtered candidate list per entry.
    let grid_bytes = puzzle.geometry().num_cells() * size_of::<Cell>()
        + entries * size_of::<Slot<'static>>()
        + entries * per_entry * size_of::<usize>();

    let short = arena_bytes_after(&puzzle, 100);
    let long = arena_bytes_after(&puzzle, 200);
    let per_iteration = long.saturating_sub(short) / 100;

    // The successor lists ranked in between hold hundreds of placements.
    assert!(
        per_iteration <= grid_bytes,
        "arena grew by [{}] bytes per iteration, one grid is [{}] bytes",
        per_iteration,
        grid_bytes
    );
}
