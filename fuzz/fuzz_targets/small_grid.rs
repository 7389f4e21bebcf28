#![no_main]

use bumpalo::Bump;
use crossfill::{
    BacktrackConfig, Backtracker, CrosswordState, Geometry, GridState, PriorityConfig,
    PrioritySearch, Puzzle, Slot,
};
use libfuzzer_sys::fuzz_target;

const SIDE: usize = 3;
const ALPHABET: [char; 3] = ['A', 'B', 'C'];

#[derive(Debug)]
struct SmallGridInput {
    blocked: Vec<bool>,
    letters: Vec<u8>,
    max_excluded: usize,
    excluded_weight: usize,
}

impl<'a> arbitrary::Arbitrary<'a> for SmallGridInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // roughly one cell in four blocked
        let blocked = u
            .arbitrary::<[u8; SIDE * SIDE]>()?
            .into_iter()
            .map(|byte| byte % 4 == 0)
            .collect();
        let letters = u.arbitrary::<Vec<u8>>()?;
        let max_excluded = usize::from(u.arbitrary::<u8>()? % 3);
        let excluded_weight = usize::from(u.arbitrary::<u8>()? % 4);

        Ok(SmallGridInput {
            blocked,
            letters,
            max_excluded,
            excluded_weight,
        })
    }
}

fn assert_consistent(state: &GridState<'_>) {
    let puzzle = state.puzzle();
    for entry in 0..puzzle.entries().len() {
        let text = state.entry_text(entry);
        if state.slot(entry) == Slot::Excluded || text.contains('-') {
            continue;
        }

        let letters: Vec<char> = text.chars().collect();
        assert!(puzzle.candidates(entry).contains(&letters));
    }
}

fuzz_target!(|data: SmallGridInput| {
    let Ok(geometry) = Geometry::new(SIDE, SIDE, data.blocked) else {
        return;
    };

    // Up to three candidates per entry, drawn from the letter pool in order.
    let mut pool = data
        .letters
        .iter()
        .map(|byte| ALPHABET[usize::from(*byte) % ALPHABET.len()])
        .cycle();
    let entries: Vec<_> = geometry
        .entries()
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let count = if data.letters.is_empty() { 0 } else { index % 3 + 1 };
            let words = (0..count)
                .map(|_| pool.by_ref().take(entry.length).collect::<String>())
                .collect();

            (entry, words)
        })
        .collect();

    let puzzle = Puzzle::new(geometry, entries).unwrap();
    let arena = Bump::new();
    let initial = puzzle.initial_state(&arena);

    let outcome = Backtracker::new(
        BacktrackConfig::default()
            .with_max_excluded(data.max_excluded)
            .with_max_iterations(10_000),
    )
    .solve(initial);
    if let Some(state) = outcome.state() {
        assert!(state.num_excluded() <= data.max_excluded);
        assert_consistent(state);
    }

    let result = PrioritySearch::new(PriorityConfig::default().with_max_iterations(2_000))
        .search(CrosswordState::new(initial).with_excluded_weight(data.excluded_weight));
    assert!(result.iterations <= 2_000);
    assert_consistent(result.state.grid());
});
