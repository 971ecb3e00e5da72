//! Line-oriented command language for driving a session from text.
//!
//! ```text
//! level 1
//! select 0,0
//! place 0 0 bulbasaur
//! place 1,1 4
//! clear 0 0
//! undo
//! show
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::catalog::{LevelId, Pokedex};
use crate::games::puzzle_grid::{Action, CellPosition};
use tracing::{debug, instrument};

/// One parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Dispatch an action into the session.
    Dispatch(Action),
    /// Step back one snapshot.
    Undo,
    /// Re-apply one undone snapshot.
    Redo,
    /// Print the board.
    Show,
    /// Print the command list.
    Help,
    /// Stop reading input.
    Quit,
}

/// Error parsing a script line.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ScriptError {
    /// The first word is not a command.
    #[display("Unknown command '{}' (try 'help')", _0)]
    UnknownCommand(String),

    /// Arguments are missing or malformed.
    #[display("Usage: {}", _0)]
    Usage(&'static str),

    /// No Pokemon matches the name or number.
    #[display("No Pokemon named or numbered '{}'", _0)]
    UnknownPokemon(String),
}

impl std::error::Error for ScriptError {}

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  select <row> <col>         focus a cell
  deselect                   clear the focus
  place <row> <col> <name|#> put a Pokemon in a cell
  clear <row> <col>          empty a cell
  reset                      empty the whole grid
  level <id>                 switch level (clears the grid)
  undo | redo                step through history
  show                       print the board
  help                       this text
  quit                       leave";

const SELECT_USAGE: &str = "select <row> <col>";
const PLACE_USAGE: &str = "place <row> <col> <name|number>";
const CLEAR_USAGE: &str = "clear <row> <col>";
const LEVEL_USAGE: &str = "level <id>";

/// Parses one line. Returns `Ok(None)` for blank and comment lines.
///
/// Pokemon references are resolved against `pokedex` so the resulting
/// action carries the full entry.
#[instrument(skip(pokedex))]
pub fn parse_line(line: &str, pokedex: &Pokedex) -> Result<Option<ScriptCommand>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    debug!(command = word, "Parsing script line");

    let command = match word.to_lowercase().as_str() {
        "select" => {
            let position = parse_position(rest).ok_or(ScriptError::Usage(SELECT_USAGE))?;
            ScriptCommand::Dispatch(Action::select(position))
        }
        "deselect" => ScriptCommand::Dispatch(Action::deselect()),
        "place" => {
            let (position, query) = split_position(rest).ok_or(ScriptError::Usage(PLACE_USAGE))?;
            if query.is_empty() {
                return Err(ScriptError::Usage(PLACE_USAGE));
            }
            let pokemon = pokedex
                .resolve(query)
                .ok_or_else(|| ScriptError::UnknownPokemon(query.to_string()))?;
            ScriptCommand::Dispatch(Action::place(position, pokemon))
        }
        "clear" => {
            let position = parse_position(rest).ok_or(ScriptError::Usage(CLEAR_USAGE))?;
            ScriptCommand::Dispatch(Action::ClearCell(position))
        }
        "reset" => ScriptCommand::Dispatch(Action::ResetGrid),
        "level" => {
            let id = rest.parse::<u32>().map_err(|_| ScriptError::Usage(LEVEL_USAGE))?;
            ScriptCommand::Dispatch(Action::SetLevel(LevelId(id)))
        }
        "undo" => ScriptCommand::Undo,
        "redo" => ScriptCommand::Redo,
        "show" => ScriptCommand::Show,
        "help" | "?" => ScriptCommand::Help,
        "quit" | "exit" => ScriptCommand::Quit,
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_position(text: &str) -> Option<CellPosition> {
    text.parse().ok()
}

/// Splits `"<row> <col> rest"` or `"<row>,<col> rest"` into a coordinate and the rest.
fn split_position(text: &str) -> Option<(CellPosition, &str)> {
    let mut words = text.splitn(2, char::is_whitespace);
    let first = words.next()?;
    if first.contains(',') {
        let position = parse_position(first)?;
        return Some((position, words.next().unwrap_or("").trim()));
    }

    let remainder = words.next()?.trim_start();
    let (second, rest) = remainder
        .split_once(char::is_whitespace)
        .unwrap_or((remainder, ""));
    let position = CellPosition::new(first.parse().ok()?, second.parse().ok()?);
    Some((position, rest.trim()))
}
