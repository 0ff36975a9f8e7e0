//! Optimal solver for the N×N sliding-tile puzzle.
//!
//! Boards are locked [`State`]s that hash by content. [`a_star`] expands them
//! in order of path cost plus a [`Heuristic`] estimate, using a [`Frontier`]
//! that can test membership and lower a queued state's priority in place.

pub mod action;
pub mod config;
pub mod error;
pub mod frontier;
pub mod generator;
pub mod heuristic;
pub mod render;
pub mod search;
pub mod solvability;
pub mod state;

pub use action::{apply, available_actions, Action, Direction};
pub use config::{Budget, SearchConfig};
pub use error::{PuzzleError, SearchError};
pub use frontier::Frontier;
pub use generator::{GeneratorConfig, PuzzleGenerator, ScrambleMode};
pub use heuristic::{is_goal, linear_conflict, manhattan_distance, misplaced_tiles, Heuristic, Memo};
pub use search::{a_star, compare, solve, Search, SearchStats, Solution};
pub use solvability::is_solvable;
pub use state::{Grid, Pos, State};
