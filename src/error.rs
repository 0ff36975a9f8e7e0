//! Error types for puzzle construction and search.
//!
//! Integrity violations ([`PuzzleError`]) mean a caller broke a contract:
//! a malformed grid, a duplicate frontier push, a replace on a state that
//! is not queued. They abort whatever operation produced them.
//!
//! [`SearchError`] covers every way a search can end without reaching the
//! goal. Each variant is a distinct, inspectable outcome.

use std::time::Duration;

use thiserror::Error;

use crate::state::State;

/// Contract breaches on grids, states and the frontier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("grid must be at least 2x2, got {size}x{size}")]
    TooSmall { size: usize },

    #[error("grid of size {size}x{size} does not fit 16-bit tiles")]
    TooLarge { size: usize },

    #[error("grid is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("grid has {count} cells, which is not a square number")]
    NotSquareCount { count: usize },

    #[error("grid must contain exactly one blank, found {count}")]
    BlankCount { count: usize },

    #[error("tile {value} is out of range 0..{limit}")]
    OutOfRange { value: u16, limit: usize },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u16 },

    #[error("cannot parse grid cell {cell:?}")]
    BadCell { cell: String },

    #[error("unknown {kind} {name:?}")]
    UnknownName { kind: &'static str, name: String },

    #[error("state is already queued in the frontier:\n{state}")]
    DuplicateEntry { state: State },

    #[error("state is not queued in the frontier:\n{state}")]
    NotQueued { state: State },
}

/// Every non-solution outcome of a search.
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    #[error("integrity violation: {0}")]
    Integrity(#[from] PuzzleError),

    #[error("puzzle is not solvable")]
    Unsolvable,

    #[error("no solution found: frontier exhausted after {expanded} expansions")]
    Exhausted { expanded: usize },

    #[error(
        "search aborted after {expanded} expansions ({:.3} secs), best-known state so far (estimate {best_estimate}):\n{best}",
        .elapsed.as_secs_f64()
    )]
    BudgetExceeded {
        expanded: usize,
        elapsed: Duration,
        best: State,
        best_estimate: u32,
    },
}
