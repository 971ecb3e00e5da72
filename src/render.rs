//! Plain-text board rendering.

use crate::catalog::Level;
use crate::games::puzzle_grid::{Cell, GameState};
use tracing::instrument;

const CELL_WIDTH: usize = 16;

/// Renders the board, labelled with the level's criteria when one is given.
///
/// The selected cell is wrapped in brackets and empty cells show their
/// coordinate.
#[instrument(skip(state, level))]
pub fn render_board(state: &GameState, level: Option<&Level>) -> String {
    let grid = state.grid();
    let size = grid.size();
    let mut out = String::new();

    match (state.level(), level) {
        (_, Some(level)) => out.push_str(&format!("Level {}: {}\n", level.id(), level.name())),
        (Some(id), None) => out.push_str(&format!("Level {}\n", id)),
        (None, None) => out.push_str("No level selected\n"),
    }

    let column_labels: Vec<String> = (0..size)
        .map(|col| {
            level
                .and_then(|l| l.columns().get(col))
                .map(ToString::to_string)
                .unwrap_or_else(|| format!("col {}", col))
        })
        .collect();
    out.push_str(&pad(""));
    for label in &column_labels {
        out.push_str(" | ");
        out.push_str(&pad(label));
    }
    out.push('\n');

    let rule = "-".repeat(CELL_WIDTH);
    out.push_str(&rule);
    for _ in 0..size {
        out.push_str("-+-");
        out.push_str(&rule);
    }
    out.push('\n');

    for row in 0..size {
        let label = level
            .and_then(|l| l.rows().get(row))
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("row {}", row));
        out.push_str(&pad(&label));
        for cell in grid.row(row) {
            out.push_str(" | ");
            out.push_str(&pad(&cell_text(cell, state)));
        }
        out.push('\n');
    }

    let used: Vec<String> = state.used().iter().map(ToString::to_string).collect();
    out.push_str(&format!("Used: {{{}}}\n", used.join(", ")));
    out
}

fn cell_text(cell: &Cell, state: &GameState) -> String {
    let text = match cell.pokemon() {
        Some(pokemon) => pokemon.name().clone(),
        None => format!("{},{}", cell.position().row, cell.position().col),
    };
    if state.selection() == Some(*cell.position()) {
        format!("[{}]", text)
    } else {
        text
    }
}

fn pad(text: &str) -> String {
    let truncated: String = text.chars().take(CELL_WIDTH).collect();
    format!("{:<width$}", truncated, width = CELL_WIDTH)
}
