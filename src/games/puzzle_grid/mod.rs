//! Grid state engine: data model, actions, transition function, contracts.

mod action;
mod contracts;
mod engine;
pub mod invariants;
mod position;
mod types;

pub use action::{Action, TransitionError};
pub use contracts::{Contract, PositionInBounds, TransitionContract};
pub use engine::{GridEngine, OverwritePolicy, apply};
pub use position::{CellPosition, ParsePositionError};
pub use types::{
    Cell, GRID_SIZE, GameState, Grid, SnapshotError, create_initial_grid, create_initial_state,
};
