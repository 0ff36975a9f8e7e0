//! Scrambled start positions.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::action::available_actions;
use crate::error::PuzzleError;
use crate::solvability::is_solvable;
use crate::state::{check_size, Grid, State};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrambleMode {
    /// Uniformly random legal moves away from the goal
    #[default]
    Walk,
    /// Uniform permutation, redrawn until it is solvable
    Shuffle,
}

impl fmt::Display for ScrambleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScrambleMode::Walk => "walk",
            ScrambleMode::Shuffle => "shuffle",
        })
    }
}

impl FromStr for ScrambleMode {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "walk" => Ok(ScrambleMode::Walk),
            "shuffle" => Ok(ScrambleMode::Shuffle),
            _ => Err(PuzzleError::UnknownName {
                kind: "scramble mode",
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Board width
    pub size: usize,
    /// Random moves applied in walk mode
    pub steps: usize,
    /// Random seed for reproducibility (None for random)
    pub seed: Option<u64>,
    pub mode: ScrambleMode,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 3,
            steps: 200,
            seed: Some(42),
            mode: ScrambleMode::Walk,
        }
    }
}

pub struct PuzzleGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl PuzzleGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, PuzzleError> {
        check_size(config.size)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Draws the next start position. Successive calls on one generator give
    /// different boards; two generators with the same seed give the same
    /// sequence.
    pub fn generate(&mut self) -> Result<State, PuzzleError> {
        let state = match self.config.mode {
            ScrambleMode::Walk => self.random_walk(),
            ScrambleMode::Shuffle => self.shuffle()?,
        };
        debug!(mode = %self.config.mode, size = self.config.size, "generated start\n{state}");
        Ok(state)
    }

    fn random_walk(&mut self) -> State {
        let mut state = State::goal(self.config.size);
        for _ in 0..self.config.steps {
            if let Some(action) = available_actions(&state).choose(&mut self.rng) {
                state = action.apply(&state);
            }
        }
        state
    }

    fn shuffle(&mut self) -> Result<State, PuzzleError> {
        let mut flattened = Grid::goal(self.config.size).cells().to_vec();

        loop {
            flattened.shuffle(&mut self.rng);
            if is_solvable(&flattened, self.config.size)? {
                break;
            }
        }

        Ok(Grid::from_cells(self.config.size, flattened)?.lock())
    }
}
