//! Board configurations.
//!
//! A board goes through two phases. A [`Grid`] is the mutable buffer: it is
//! built from rows, parsed from text or copied out of an existing state, and
//! may have cells swapped. [`Grid::lock`] consumes it and returns a
//! [`State`], which is read-only, carries a cached structural hash, and is
//! cheap to clone so the cost map and the frontier can share it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use rustc_hash::FxHasher;

use crate::error::PuzzleError;

/// A cell coordinate, row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Boards run from 2x2 up to the largest size whose tiles fit in a `u16`.
pub fn check_size(size: usize) -> Result<(), PuzzleError> {
    if size < 2 {
        return Err(PuzzleError::TooSmall { size });
    }
    if size > 256 {
        return Err(PuzzleError::TooLarge { size });
    }
    Ok(())
}

/// Checks that row-major `cells` form a `size`×`size` permutation of
/// `0..size*size`, which also guarantees exactly one blank.
pub fn validate_cells(size: usize, cells: &[u16]) -> Result<(), PuzzleError> {
    check_size(size)?;
    let limit = size * size;
    if cells.len() != limit {
        return Err(PuzzleError::NotSquareCount { count: cells.len() });
    }

    let blanks = cells.iter().filter(|&&v| v == 0).count();
    if blanks != 1 {
        return Err(PuzzleError::BlankCount { count: blanks });
    }

    let mut seen = vec![false; limit];
    for &value in cells {
        let slot = seen
            .get_mut(value as usize)
            .ok_or(PuzzleError::OutOfRange { value, limit })?;
        if *slot {
            return Err(PuzzleError::DuplicateTile { value });
        }
        *slot = true;
    }
    Ok(())
}

/// Mutable board buffer. Always holds a permutation of `0..size*size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<u16>,
}

impl Grid {
    /// Builds a grid from rows, rejecting anything that is not a square
    /// permutation of `0..N²` with exactly one blank.
    pub fn new(rows: Vec<Vec<u16>>) -> Result<Self, PuzzleError> {
        let size = rows.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(PuzzleError::NotSquare {
                    row,
                    len: cells.len(),
                    expected: size,
                });
            }
        }
        Self::from_cells(size, rows.into_iter().flatten().collect())
    }

    /// Builds a grid from row-major cells.
    pub fn from_cells(size: usize, cells: Vec<u16>) -> Result<Self, PuzzleError> {
        validate_cells(size, &cells)?;
        Ok(Self { size, cells })
    }

    /// The solved configuration: `1..N²-1` in row-major order, blank last.
    ///
    /// # Panics
    ///
    /// If `size` is rejected by [`check_size`].
    pub fn goal(size: usize) -> Self {
        if let Err(e) = check_size(size) {
            panic!("cannot build goal board: {e}");
        }
        let limit = size * size;
        let cells = (1..limit)
            .map(|value| value as u16)
            .chain(std::iter::once(0))
            .collect();

        Self { size, cells }
    }

    /// Deep copy of a locked state's contents.
    pub fn from_state(state: &State) -> Self {
        Self {
            size: state.size,
            cells: state.cells.to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    pub fn get(&self, pos: Pos) -> u16 {
        self.cells[pos.row * self.size + pos.col]
    }

    /// Exchanges two cells. Swaps keep the grid a permutation, so this is the
    /// only mutator a grid exposes.
    pub fn swap(&mut self, a: Pos, b: Pos) {
        self.cells.swap(a.row * self.size + a.col, b.row * self.size + b.col);
    }

    /// Freezes the grid into a hashable [`State`].
    pub fn lock(self) -> State {
        let blank = self
            .cells
            .iter()
            .position(|&v| v == 0)
            .unwrap_or_default();

        let mut hasher = FxHasher::default();
        self.size.hash(&mut hasher);
        self.cells.hash(&mut hasher);

        State {
            size: self.size,
            blank,
            hash: hasher.finish(),
            cells: self.cells.into(),
        }
    }
}

/// Parses rows separated by `;` or newlines, cells separated by `,` or
/// whitespace: `"1,2,3;4,5,6;7,8,0"`.
impl FromStr for Grid {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(|c| c == ';' || c == '\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|cell| !cell.is_empty())
                    .map(|cell| {
                        cell.parse::<u16>().map_err(|_| PuzzleError::BadCell {
                            cell: cell.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rows)
    }
}

/// A locked board configuration.
///
/// Equality is by content: the cached hashes are compared first and the
/// cells only when those agree.
#[derive(Clone)]
pub struct State {
    size: usize,
    cells: Arc<[u16]>,
    blank: usize,
    hash: u64,
}

impl State {
    pub fn goal(size: usize) -> Self {
        Grid::goal(size).lock()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    pub fn get(&self, pos: Pos) -> u16 {
        self.cells[pos.row * self.size + pos.col]
    }

    pub fn blank(&self) -> Pos {
        Pos::new(self.blank / self.size, self.blank % self.size)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        self.cells.chunks(self.size)
    }

    /// The hash computed when the grid was locked.
    pub fn structural_hash(&self) -> u64 {
        self.hash
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.size == other.size && self.cells == other.cells
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("size", &self.size)
            .field("cells", &&self.cells[..])
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells.len() - 1).to_string().len();
        for row in self.rows() {
            for &val in row {
                write!(f, "{:>width$} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
