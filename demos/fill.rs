//! Fill a small grid with both engines
//! Usage:
//!
//! ```bash
//! cargo run --release --example fill
//! cargo run --release --example fill -- 1
//! ```
//!
//! The optional argument is the exclusion budget for the backtracking run.

use bumpalo::Bump;
use crossfill::{
    BacktrackConfig, BacktrackOutcome, Backtracker, CrosswordState, Direction, Entry, Geometry,
    PrioritySearch, Puzzle, SearchState,
};

const ROWS: [&str; 4] = ["---#", "----", "----", "#---"];

/// Ranked candidates per entry, as a clue solver would suggest them.
fn candidates(entry: &Entry) -> Vec<String> {
    let list: &[&str] = match (entry.direction, entry.row, entry.column) {
        (Direction::Across, 0, 0) => &["CAT", "CAB", "COB"],
        (Direction::Across, 1, 0) => &["AREA", "ALOE"],
        (Direction::Across, 2, 0) => &["TEND", "TENT", "RENT"],
        (Direction::Across, 3, 1) => &["ODD", "ADD"],
        (Direction::Down, 0, 0) => &["CAT", "BAT"],
        (Direction::Down, 0, 1) => &["AREA", "ORCA"],
        (Direction::Down, 0, 2) => &["BEND", "TEND"],
        (Direction::Down, 1, 3) => &["ADD", "AID"],
        _ => &[],
    };

    list.iter().map(|word| word.to_string()).collect()
}

fn main() {
    let max_excluded = match std::env::args().nth(1).map(|arg| arg.parse::<usize>()) {
        None => 0,
        Some(Ok(budget)) => budget,
        Some(Err(err)) => {
            eprintln!("invalid exclusion budget: {}", err);
            std::process::exit(1);
        }
    };

    let geometry = match Geometry::from_rows(ROWS) {
        Ok(geometry) => geometry,
        Err(err) => {
            eprintln!("invalid grid: {}", err);
            std::process::exit(1);
        }
    };
    let puzzle = match Puzzle::from_source(geometry, &candidates) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("invalid puzzle: {}", err);
            std::process::exit(1);
        }
    };

    let arena = Bump::new();
    let initial = puzzle.initial_state(&arena);

    println!("Backtracking with exclusion budget {}:", max_excluded);
    let engine = Backtracker::new(BacktrackConfig::default().with_max_excluded(max_excluded));
    match engine.solve(initial) {
        BacktrackOutcome::Solved(state) => print!("{}", state),
        BacktrackOutcome::BudgetExhausted(state) => {
            println!("ran out of iterations, last state:");
            print!("{}", state);
        }
        BacktrackOutcome::Unsolvable => println!("no fill"),
    }

    println!();
    println!("Best-first search:");
    let result = PrioritySearch::default().search(CrosswordState::new(initial));
    println!(
        "{:?} after {} iterations, heuristic {}",
        result.termination,
        result.iterations,
        result.state.heuristic()
    );
    print!("{}", result.state.grid());
    for entry in result.state.grid().excluded_entries() {
        println!("excluded: {}", puzzle.entries()[entry]);
    }
}
