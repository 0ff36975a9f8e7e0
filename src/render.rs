//! Styled terminal output for boards and solution replays.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};

use crate::action::Action;
use crate::state::{Pos, State};

/// Writes `state` one row per line. Tiles already on their goal cell are
/// green, the blank is dimmed, and the tile at `moved` is highlighted.
pub fn write_board<W: Write>(out: &mut W, state: &State, moved: Option<Pos>) -> io::Result<()> {
    let size = state.size();
    let len = size * size;
    let width = (len - 1).to_string().len();

    for row in 0..size {
        for col in 0..size {
            let pos = Pos::new(row, col);
            let value = state.get(pos);
            let text = if value == 0 {
                format!("{:>width$} ", ".")
            } else {
                format!("{:>width$} ", value)
            };

            if value == 0 {
                queue!(out, PrintStyledContent(text.dark_grey()))?;
            } else if Some(pos) == moved {
                queue!(out, PrintStyledContent(text.yellow().bold()))?;
            } else if value as usize == (row * size + col + 1) % len {
                queue!(out, PrintStyledContent(text.green()))?;
            } else {
                queue!(out, Print(text))?;
            }
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

/// Writes the start board followed by the board after each move.
pub fn write_replay<W: Write>(out: &mut W, start: &State, path: &[Action]) -> io::Result<()> {
    write_board(out, start, None)?;
    let mut state = start.clone();
    for (step, action) in path.iter().enumerate() {
        state = action.apply(&state);
        writeln!(out, "\nStep {}: {}", step + 1, action.direction())?;
        // the tile that moved now sits where the blank was
        write_board(out, &state, Some(action.from))?;
    }
    out.flush()
}
