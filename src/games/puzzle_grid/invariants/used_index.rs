//! Used-set invariants: the used set tracks grid occupants.

use super::super::GameState;
use super::Invariant;

/// Invariant: every occupant's identifier is in the used set.
///
/// The used set may also hold identifiers displaced by an overwrite when
/// the engine retains them.
pub struct UsedCoversOccupantsInvariant;

impl Invariant<GameState> for UsedCoversOccupantsInvariant {
    fn holds(state: &GameState) -> bool {
        state
            .grid()
            .cells()
            .iter()
            .filter_map(|c| c.occupant_id())
            .all(|id| state.is_used(id))
    }

    fn description() -> &'static str {
        "Every placed Pokemon is marked used"
    }
}

/// Invariant: the used set equals the set of occupant identifiers.
pub struct UsedMatchesOccupantsInvariant;

impl Invariant<GameState> for UsedMatchesOccupantsInvariant {
    fn holds(state: &GameState) -> bool {
        state.grid().occupant_ids() == *state.used()
    }

    fn description() -> &'static str {
        "Used set matches the grid occupants exactly"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EvolutionStage, Pokemon, PokemonId, PokemonType};
    use crate::games::puzzle_grid::{CellPosition, create_initial_state};
    use std::sync::Arc;

    fn pikachu() -> Arc<Pokemon> {
        Arc::new(Pokemon::new(
            25u16,
            "Pikachu",
            vec![PokemonType::Electric],
            EvolutionStage::Basic,
            vec!["thunderShock".to_string()],
        ))
    }

    #[test]
    fn test_tracked_occupant_holds() {
        let mut state = create_initial_state();
        state.grid_mut().replace(CellPosition::new(0, 0), Some(pikachu()));
        state.used_mut().insert(PokemonId(25));
        assert!(UsedCoversOccupantsInvariant::holds(&state));
        assert!(UsedMatchesOccupantsInvariant::holds(&state));
    }

    #[test]
    fn test_untracked_occupant_violates() {
        let mut state = create_initial_state();
        state.grid_mut().replace(CellPosition::new(0, 0), Some(pikachu()));
        assert!(!UsedCoversOccupantsInvariant::holds(&state));
    }

    #[test]
    fn test_stale_id_only_violates_exact_match() {
        let mut state = create_initial_state();
        state.used_mut().insert(PokemonId(25));
        assert!(UsedCoversOccupantsInvariant::holds(&state));
        assert!(!UsedMatchesOccupantsInvariant::holds(&state));
    }
}
