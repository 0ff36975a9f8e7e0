use std::fmt;

use crate::state::{Grid, Pos, State};

/// Direction the blank travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Generation order for successors.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One blank swap: the blank at `from` trades places with the tile at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub from: Pos,
    pub to: Pos,
}

impl Action {
    pub fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }

    /// The swap that undoes this one.
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.to.row < self.from.row {
            Direction::Up
        } else if self.to.row > self.from.row {
            Direction::Down
        } else if self.to.col < self.from.col {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Copies `state`, swaps the two cells and locks the result. The input is
    /// never touched.
    pub fn apply(&self, state: &State) -> State {
        debug_assert_eq!(state.get(self.from), 0, "action must start at the blank");
        debug_assert_eq!(
            self.from.row.abs_diff(self.to.row) + self.from.col.abs_diff(self.to.col),
            1,
            "action must move to an adjacent cell"
        );

        let mut grid = Grid::from_state(state);
        grid.swap(self.from, self.to);
        grid.lock()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.direction(), self.from, self.to)
    }
}

/// Legal blank moves from `state`, in [`Direction::ALL`] order. Corners give
/// two, edges three, interior cells four.
pub fn available_actions(state: &State) -> Vec<Action> {
    let blank = state.blank();
    let size = state.size() as isize;

    Direction::ALL
        .iter()
        .filter_map(|dir| {
            let (dr, dc) = dir.as_offset();
            let row = blank.row as isize + dr;
            let col = blank.col as isize + dc;
            if row >= 0 && row < size && col >= 0 && col < size {
                Some(Action::new(blank, Pos::new(row as usize, col as usize)))
            } else {
                None
            }
        })
        .collect()
}

/// Successor of `state` under `action`.
pub fn apply(state: &State, action: Action) -> State {
    action.apply(state)
}
