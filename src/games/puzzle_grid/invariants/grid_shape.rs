//! Grid shape invariant: exactly one cell per coordinate.

use super::super::GameState;
use super::Invariant;

/// Invariant: the grid holds `size * size` cells and the cell at each
/// row-major index carries that index's coordinate.
pub struct GridShapeInvariant;

impl Invariant<GameState> for GridShapeInvariant {
    fn holds(state: &GameState) -> bool {
        state.grid().is_well_formed()
    }

    fn description() -> &'static str {
        "Grid holds exactly one cell per coordinate"
    }
}
