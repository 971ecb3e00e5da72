//! First-class action types for the puzzle grid.
//!
//! Actions are the entire inbound surface of the engine. They carry the
//! player's intent and can be validated, logged and serialized for replay
//! independently of being applied.

use super::position::CellPosition;
use crate::catalog::{LevelId, Pokemon};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An action dispatched into the grid engine.
///
/// The JSON form is adjacently tagged: `{"type": "PLACE_POKEMON", "payload": {...}}`.
/// Any tag the engine does not know deserializes to [`Action::Unknown`],
/// whatever its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", try_from = "RawAction")]
pub enum Action {
    /// Focus a cell, or clear the focus with `None`.
    #[serde(rename = "SET_SELECTED_CELL")]
    SelectCell(Option<CellPosition>),

    /// Put a Pokemon into a cell, replacing any occupant.
    #[serde(rename = "PLACE_POKEMON")]
    PlaceEntity {
        /// Target cell.
        position: CellPosition,
        /// Pokemon to place.
        pokemon: Arc<Pokemon>,
    },

    /// Empty a cell.
    #[serde(rename = "CLEAR_CELL")]
    ClearCell(CellPosition),

    /// Empty the whole grid, keeping the level.
    #[serde(rename = "RESET_GRID")]
    ResetGrid,

    /// Switch level and start from a clean board.
    #[serde(rename = "SET_LEVEL")]
    SetLevel(LevelId),

    /// An action the engine does not recognize. Applying it is a no-op.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Wire shape read before the tag is dispatched.
#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct PlacePayload {
    position: CellPosition,
    pokemon: Arc<Pokemon>,
}

impl TryFrom<RawAction> for Action {
    type Error = serde_json::Error;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let action = match raw.kind.as_str() {
            "SET_SELECTED_CELL" => Action::SelectCell(serde_json::from_value(raw.payload)?),
            "PLACE_POKEMON" => {
                let PlacePayload { position, pokemon } = serde_json::from_value(raw.payload)?;
                Action::PlaceEntity { position, pokemon }
            }
            "CLEAR_CELL" => Action::ClearCell(serde_json::from_value(raw.payload)?),
            "RESET_GRID" => Action::ResetGrid,
            "SET_LEVEL" => Action::SetLevel(serde_json::from_value(raw.payload)?),
            other => {
                tracing::debug!(kind = other, "Unrecognized action tag");
                Action::Unknown
            }
        };
        Ok(action)
    }
}

impl Action {
    /// Creates a placement action.
    pub fn place(position: CellPosition, pokemon: Arc<Pokemon>) -> Self {
        Action::PlaceEntity { position, pokemon }
    }

    /// Creates a selection action for a cell.
    pub fn select(position: CellPosition) -> Self {
        Action::SelectCell(Some(position))
    }

    /// Creates an action clearing the selection.
    pub fn deselect() -> Self {
        Action::SelectCell(None)
    }

    /// The coordinate this action addresses, if any.
    pub fn position(&self) -> Option<CellPosition> {
        match self {
            Action::SelectCell(pos) => *pos,
            Action::PlaceEntity { position, .. } => Some(*position),
            Action::ClearCell(pos) => Some(*pos),
            Action::ResetGrid | Action::SetLevel(_) | Action::Unknown => None,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SelectCell(_) => "select_cell",
            Action::PlaceEntity { .. } => "place_entity",
            Action::ClearCell(_) => "clear_cell",
            Action::ResetGrid => "reset_grid",
            Action::SetLevel(_) => "set_level",
            Action::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::SelectCell(Some(pos)) => write!(f, "select {}", pos),
            Action::SelectCell(None) => write!(f, "deselect"),
            Action::PlaceEntity { position, pokemon } => {
                write!(f, "place {} at {}", pokemon.name(), position)
            }
            Action::ClearCell(pos) => write!(f, "clear {}", pos),
            Action::ResetGrid => write!(f, "reset"),
            Action::SetLevel(id) => write!(f, "level {}", id),
            Action::Unknown => write!(f, "unknown action"),
        }
    }
}

/// Error that can occur when applying an action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TransitionError {
    /// The coordinate lies outside the grid.
    #[display("Position {} is outside the {}x{} grid", position, size, size)]
    OutOfBounds {
        /// Offending coordinate.
        position: CellPosition,
        /// Edge length of the grid.
        size: usize,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for TransitionError {}
