mod common;

use bumpalo::Bump;
use common::{assert_consistent, init_logging, two_by_two, two_letter_tangle, word_square};
use crossfill::{
    BacktrackConfig, Backtracker, CrosswordState, PrioritySearch, Puzzle, SearchState,
};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::error::Error;

type TestResult = Result<(), Box<dyn Error + Send + Sync + 'static>>;

fn check_budget(puzzle: &Puzzle, max_excluded: usize) -> TestResult {
    let arena = Bump::new();
    let initial = puzzle.initial_state(&arena);

    let outcome = Backtracker::new(BacktrackConfig::default().with_max_excluded(max_excluded))
        .solve(initial);
    let state = outcome
        .state()
        .ok_or_else(|| format!("no fill with [{}] excluded entries", max_excluded))?;

    if state.num_excluded() > max_excluded {
        return Err(format!(
            "fill excludes [{}] entries, budget is [{}]",
            state.num_excluded(),
            max_excluded
        )
        .into());
    }
    assert_consistent(state);

    Ok(())
}

fn check_weight(puzzle: &Puzzle, excluded_weight: usize) -> TestResult {
    let arena = Bump::new();
    let initial = CrosswordState::new(puzzle.initial_state(&arena))
        .with_excluded_weight(excluded_weight);

    let result = PrioritySearch::default().search(initial);
    if !result.is_terminal() {
        return Err(format!(
            "weight [{}] stopped with [{:?}] at heuristic [{}]",
            excluded_weight,
            result.termination,
            result.state.heuristic()
        )
        .into());
    }
    assert_consistent(result.state.grid());

    Ok(())
}

#[test]
fn fixtures_fill_under_every_exclusion_budget() -> TestResult {
    init_logging();

    let puzzles = [two_by_two(), word_square(), two_letter_tangle()];
    let runs: Vec<_> = (0..3usize)
        .flat_map(|max_excluded| puzzles.iter().map(move |puzzle| (puzzle, max_excluded)))
        .collect();

    runs.into_par_iter()
        .try_for_each(|(puzzle, max_excluded)| check_budget(puzzle, max_excluded))
}

#[test]
fn fixtures_fill_under_every_exclusion_weight() -> TestResult {
    init_logging();

    let puzzles = [two_by_two(), word_square(), two_letter_tangle()];

    [0usize, 1, 2, 5, 100]
        .into_par_iter()
        .try_for_each(|weight| {
            puzzles
                .iter()
                .try_for_each(|puzzle| check_weight(puzzle, weight))
        })
}
