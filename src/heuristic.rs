//! Admissible distance estimates and the goal test.
//!
//! All of these are pure functions of a [`State`]'s content, so results can
//! be cached in a [`Memo`] and reused across searches on the same board size.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::error::PuzzleError;
use crate::state::State;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    MisplacedTiles,
    #[default]
    Manhattan,
    LinearConflict,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [
        Heuristic::MisplacedTiles,
        Heuristic::Manhattan,
        Heuristic::LinearConflict,
    ];

    pub fn estimate(self, state: &State) -> u32 {
        match self {
            Heuristic::MisplacedTiles => misplaced_tiles(state),
            Heuristic::Manhattan => manhattan_distance(state),
            Heuristic::LinearConflict => linear_conflict(state),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::MisplacedTiles => "misplaced",
            Heuristic::Manhattan => "manhattan",
            Heuristic::LinearConflict => "linear-conflict",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| PuzzleError::UnknownName {
                kind: "heuristic",
                name: s.to_string(),
            })
    }
}

/// Value the cell at row-major `index` holds when solved.
fn goal_value(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// Number of non-blank tiles not on their goal cell.
pub fn misplaced_tiles(state: &State) -> u32 {
    let len = state.cells().len();
    state
        .cells()
        .iter()
        .enumerate()
        .filter(|&(i, &value)| value != 0 && value as usize != goal_value(i, len))
        .count() as u32
}

/// Sum of row and column distances from each tile to its goal cell.
pub fn manhattan_distance(state: &State) -> u32 {
    let size = state.size();
    let mut distance = 0;

    for (i, &value) in state.cells().iter().enumerate() {
        if value != 0 {
            let target_row = (value as usize - 1) / size;
            let target_col = (value as usize - 1) % size;
            distance += (i / size).abs_diff(target_row) + (i % size).abs_diff(target_col);
        }
    }
    distance as u32
}

/// Manhattan distance plus two moves for every tile that has to step out of
/// its goal row or column so the others in that line can pass it.
///
/// Within one line only the tiles that belong to it are considered; the
/// fewest that must leave is the line length minus the longest run already
/// in increasing goal order.
pub fn linear_conflict(state: &State) -> u32 {
    let size = state.size();
    let mut conflicts = 0;
    let mut line = Vec::with_capacity(size);

    for row in 0..size {
        line.clear();
        for col in 0..size {
            let value = state.cells()[row * size + col] as usize;
            if value != 0 && (value - 1) / size == row {
                line.push((value - 1) % size);
            }
        }
        conflicts += line.len() - longest_increasing(&line);
    }

    for col in 0..size {
        line.clear();
        for row in 0..size {
            let value = state.cells()[row * size + col] as usize;
            if value != 0 && (value - 1) % size == col {
                line.push((value - 1) / size);
            }
        }
        conflicts += line.len() - longest_increasing(&line);
    }

    manhattan_distance(state) + 2 * conflicts as u32
}

fn longest_increasing(seq: &[usize]) -> usize {
    let mut tails: Vec<usize> = Vec::with_capacity(seq.len());
    for &x in seq {
        match tails.binary_search(&x) {
            Ok(_) => {}
            Err(at) if at == tails.len() => tails.push(x),
            Err(at) => tails[at] = x,
        }
    }
    tails.len()
}

/// True iff cell `(i, j)` holds `(i*N + j + 1) mod N²` everywhere.
pub fn is_goal(state: &State) -> bool {
    let len = state.cells().len();
    state
        .cells()
        .iter()
        .enumerate()
        .all(|(i, &value)| value as usize == goal_value(i, len))
}

/// Cache of heuristic values keyed by state content.
///
/// Entries never go stale because states are immutable, so one memo can
/// serve several searches in a row. Call [`Memo::clear`] between unrelated
/// workloads to release memory.
#[derive(Debug, Default)]
pub struct Memo {
    estimates: [FxHashMap<State, u32>; 3],
    hits: u64,
    misses: u64,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estimate(&mut self, heuristic: Heuristic, state: &State) -> u32 {
        let cache = &mut self.estimates[heuristic.slot()];
        if let Some(&h) = cache.get(state) {
            self.hits += 1;
            return h;
        }
        self.misses += 1;
        let h = heuristic.estimate(state);
        cache.insert(state.clone(), h);
        h
    }

    pub fn len(&self) -> usize {
        self.estimates.iter().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        for cache in &mut self.estimates {
            cache.clear();
        }
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Grid;

    fn state(text: &str) -> State {
        text.parse::<Grid>().unwrap().lock()
    }

    #[test]
    fn goal_scores_zero() {
        for size in 2..=5 {
            let goal = State::goal(size);
            assert!(is_goal(&goal));
            for h in Heuristic::ALL {
                assert_eq!(h.estimate(&goal), 0, "{h} on {size}x{size}");
            }
        }
    }

    #[test]
    fn known_values() {
        let s = state("8,1,3;4,0,2;7,6,5");
        assert!(!is_goal(&s));
        assert_eq!(misplaced_tiles(&s), 5);
        // 8:3, 1:1, 2:2, 6:2, 5:2
        assert_eq!(manhattan_distance(&s), 10);
    }

    #[test]
    fn row_conflict_adds_two() {
        // 2 and 1 both belong to the top row but are reversed
        let s = state("2,1,3;4,5,6;7,8,0");
        assert_eq!(manhattan_distance(&s), 2);
        assert_eq!(linear_conflict(&s), 4);
    }

    #[test]
    fn conflicts_count_tiles_to_remove_not_pairs() {
        // 3,1,2 needs only tile 3 out of the way
        let s = state("3,1,2;4,5,6;7,8,0");
        assert_eq!(linear_conflict(&s), manhattan_distance(&s) + 2);
    }

    #[test]
    fn estimates_are_ordered() {
        let s = state("5,1,2;0,4,3;7,8,6");
        let m = misplaced_tiles(&s);
        let d = manhattan_distance(&s);
        let l = linear_conflict(&s);
        assert!(d >= m);
        assert!(l >= d);
    }

    #[test]
    fn parse_names() {
        assert_eq!("manhattan".parse::<Heuristic>(), Ok(Heuristic::Manhattan));
        assert_eq!(
            "linear-conflict".parse::<Heuristic>(),
            Ok(Heuristic::LinearConflict)
        );
        assert!("euclid".parse::<Heuristic>().is_err());
    }

    #[test]
    fn memo_hits_on_equal_content() {
        let mut memo = Memo::new();
        let a = state("1,2,3;4,5,6;7,0,8");
        let b = Grid::from_state(&a).lock();

        assert_eq!(memo.estimate(Heuristic::Manhattan, &a), 1);
        assert_eq!(memo.estimate(Heuristic::Manhattan, &b), 1);
        assert_eq!(memo.estimate(Heuristic::MisplacedTiles, &b), 1);
        assert_eq!((memo.hits(), memo.misses()), (1, 2));
        assert_eq!(memo.len(), 2);

        memo.clear();
        assert!(memo.is_empty());
    }
}
