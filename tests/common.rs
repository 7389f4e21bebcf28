use crossfill::{Entry, Geometry, GridState, Puzzle, SearchState, Slot};
use std::{cell::RefCell, rc::Rc};

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Build a puzzle over `rows` with candidates for the derived entries, in
/// derived order (across entries, then down entries).
#[allow(dead_code)]
pub fn puzzle(rows: &[&str], candidates: &[&[&str]]) -> Puzzle {
    let geometry = Geometry::from_rows(rows.iter().copied()).unwrap();
    let entries = geometry.entries();
    assert_eq!(
        entries.len(),
        candidates.len(),
        "Need one candidate list per entry."
    );

    let entries: Vec<_> = entries
        .into_iter()
        .zip(candidates.iter())
        .map(|(entry, list)| (entry, words(list)))
        .collect();

    Puzzle::new(geometry, entries).unwrap()
}

/// A 1x1 grid whose single entry has candidates `Q` and `Z`.
#[allow(dead_code)]
pub fn single_cell() -> Puzzle {
    Puzzle::new(
        Geometry::open(1, 1),
        vec![(Entry::across(0, 0, 1), words(&["Q", "Z"]))],
    )
    .unwrap()
}

/// The open 2x2 grid: 1A, 2A, 1D, 2D.
#[allow(dead_code)]
pub fn two_by_two() -> Puzzle {
    puzzle(
        &["--", "--"],
        &[&["AA", "AB"], &["AB", "BB"], &["AA", "AB"], &["BB", "AB"]],
    )
}

/// Two entries crossing at the top-left cell with no compatible letter.
#[allow(dead_code)]
pub fn incompatible_crossing() -> Puzzle {
    puzzle(&["--", "-#"], &[&["AB", "AC"], &["DB", "EC"]])
}

/// A 3x3 word square with distractors ranked first in every list.
#[allow(dead_code)]
pub fn word_square() -> Puzzle {
    puzzle(
        &["---", "---", "---"],
        &[
            &["CAT", "BAT"],
            &["ARE", "ORE"],
            &["TEN", "TAN"],
            &["BAT", "BOT"],
            &["ARE", "AXE"],
            &["TEN", "TIN"],
        ],
    )
}

/// A 3x3 grid over a two letter alphabet where most placements clash with
/// a crossing. Its only clean fill is `ABA` / `BAA` / `BBB`.
#[allow(dead_code)]
pub fn two_letter_tangle() -> Puzzle {
    puzzle(
        &["---", "---", "---"],
        &[
            &["ABA", "BAB", "AAB"],
            &["BBA", "ABB", "BAA"],
            &["AAA", "BBB"],
            &["ABB", "BBA", "BAA"],
            &["ABA", "BAB"],
            &["BBB", "AAB", "ABA"],
        ],
    )
}

/// Assert that every entry that was not excluded reads as one of its
/// candidates, or still has empty cells.
#[allow(dead_code)]
pub fn assert_consistent(state: &GridState<'_>) {
    let puzzle = state.puzzle();
    for (entry, _) in puzzle.entries().iter().enumerate() {
        let text = state.entry_text(entry);
        if state.slot(entry) == Slot::Excluded || text.contains('-') {
            continue;
        }

        let letters: Vec<char> = text.chars().collect();
        assert!(
            puzzle.candidates(entry).contains(&letters),
            "entry {} reads {:?}, which is not a candidate",
            puzzle.entries()[entry],
            text
        );
    }
}

/// Shortest weighted path on a cost grid, moving to any of the eight
/// neighbours. The heuristic is the total cost of the cells on the path.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct PathState {
    pub costs: Rc<Vec<Vec<usize>>>,
    pub path: Vec<(usize, usize)>,
    pub target: (usize, usize),
}

#[allow(dead_code)]
impl PathState {
    pub fn new(costs: Vec<Vec<usize>>, start: (usize, usize), target: (usize, usize)) -> Self {
        PathState {
            costs: Rc::new(costs),
            path: vec![start],
            target,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        *self.path.last().unwrap()
    }
}

impl SearchState for PathState {
    type Identity = (usize, usize);

    fn successors(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        let (row, column) = self.position();
        let height = self.costs.len() as isize;
        let width = self.costs[0].len() as isize;

        let steps = [
            (1, 0),
            (1, 1),
            (0, 1),
            (-1, 1),
            (-1, 0),
            (-1, -1),
            (0, -1),
            (1, -1),
        ];

        Box::new(steps.into_iter().filter_map(move |(dr, dc)| {
            let r = row as isize + dr;
            let c = column as isize + dc;
            if r < 0 || r >= height || c < 0 || c >= width {
                return None;
            }

            let next = (r as usize, c as usize);
            if self.path.contains(&next) {
                return None;
            }

            let mut path = self.path.clone();
            path.push(next);
            Some(PathState {
                costs: Rc::clone(&self.costs),
                path,
                target: self.target,
            })
        }))
    }

    fn heuristic(&self) -> usize {
        self.path.iter().map(|&(r, c)| self.costs[r][c]).sum()
    }

    fn is_terminal(&self) -> bool {
        self.position() == self.target
    }

    fn identity(&self) -> (usize, usize) {
        self.position()
    }
}

/// Wraps a state and records the identity of every state whose successors
/// are generated.
#[allow(dead_code)]
#[derive(Clone)]
pub struct Recording<S: SearchState> {
    pub inner: S,
    pub expanded: Rc<RefCell<Vec<S::Identity>>>,
}

#[allow(dead_code)]
impl<S: SearchState> Recording<S> {
    pub fn new(inner: S) -> Self {
        Recording {
            inner,
            expanded: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<S> SearchState for Recording<S>
where
    S: SearchState,
    S::Identity: Clone,
{
    type Identity = S::Identity;

    fn successors(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        self.expanded.borrow_mut().push(self.inner.identity());

        Box::new(self.inner.successors().map(move |inner| Recording {
            inner,
            expanded: Rc::clone(&self.expanded),
        }))
    }

    fn heuristic(&self) -> usize {
        self.inner.heuristic()
    }

    fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }

    fn identity(&self) -> S::Identity {
        self.inner.identity()
    }
}
