//! Selection invariant: a selection always points inside the grid.

use super::super::GameState;
use super::Invariant;

/// Invariant: if a cell is selected, its coordinate is in bounds.
pub struct SelectionInBoundsInvariant;

impl Invariant<GameState> for SelectionInBoundsInvariant {
    fn holds(state: &GameState) -> bool {
        state
            .selection()
            .is_none_or(|pos| pos.in_bounds(state.grid().size()))
    }

    fn description() -> &'static str {
        "Selection references an in-bounds cell"
    }
}
