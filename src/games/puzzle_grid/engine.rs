//! Transition function for the puzzle grid.
//!
//! [`GridEngine::apply`] is the only way a [`GameState`] changes. It reads one
//! published snapshot and returns the next one; the prior snapshot is never
//! touched, so anyone still holding it keeps an unchanged view.

use super::action::{Action, TransitionError};
use super::contracts::{Contract, TransitionContract};
use super::position::CellPosition;
use super::types::GameState;
use crate::catalog::{Pokemon, PokemonId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// What happens to a displaced occupant's identifier when a placement
/// overwrites a filled cell.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OverwritePolicy {
    /// The displaced identifier stays marked as used until a reset.
    #[default]
    Retain,
    /// The displaced identifier is released unless another cell still holds it.
    Release,
}

/// Applies actions to game state snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridEngine {
    policy: OverwritePolicy,
}

impl GridEngine {
    /// Creates an engine with the given overwrite policy.
    #[instrument]
    pub fn new(policy: OverwritePolicy) -> Self {
        Self { policy }
    }

    /// Returns the overwrite policy.
    pub fn policy(&self) -> OverwritePolicy {
        self.policy
    }

    /// Computes the state that follows `state` under `action`.
    ///
    /// [`Action::Unknown`] yields the same `Arc` (pointer-identical), so
    /// callers can detect a no-op with [`Arc::ptr_eq`].
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::OutOfBounds`] if the action addresses a
    /// coordinate outside the grid. In debug builds, returns
    /// [`TransitionError::InvariantViolation`] if the new state breaks a
    /// grid invariant.
    #[instrument(skip(self, state, action), fields(action = action.kind(), policy = %self.policy))]
    pub fn apply(
        &self,
        state: &Arc<GameState>,
        action: &Action,
    ) -> Result<Arc<GameState>, TransitionError> {
        if matches!(action, Action::Unknown) {
            debug!("Unrecognized action, state unchanged");
            return Ok(Arc::clone(state));
        }

        let current: &GameState = state;
        TransitionContract::pre(current, action)?;

        let mut next = current.clone();
        match action {
            Action::SelectCell(selection) => {
                next.set_selection(*selection);
            }
            Action::PlaceEntity { position, pokemon } => {
                self.place(&mut next, *position, pokemon);
            }
            Action::ClearCell(position) => {
                if let Some(previous) = next.grid_mut().replace(*position, None) {
                    release_if_unheld(&mut next, *previous.id());
                    debug!(pokemon = %previous.name(), %position, "Cleared cell");
                }
            }
            Action::ResetGrid => {
                next.clear_board();
            }
            Action::SetLevel(level) => {
                next.clear_board();
                next.set_level(Some(*level));
            }
            Action::Unknown => {}
        }

        #[cfg(debug_assertions)]
        TransitionContract::post_with_policy(current, &next, self.policy)?;

        Ok(Arc::new(next))
    }

    fn place(&self, next: &mut GameState, position: CellPosition, pokemon: &Arc<Pokemon>) {
        let id = *pokemon.id();
        let displaced = next.grid_mut().replace(position, Some(Arc::clone(pokemon)));

        if let Some(previous) = displaced {
            let previous_id = *previous.id();
            match self.policy {
                OverwritePolicy::Retain => {
                    if previous_id != id {
                        warn!(
                            displaced = %previous.name(),
                            %position,
                            "Overwrote occupied cell; displaced id stays marked used"
                        );
                    }
                }
                OverwritePolicy::Release => {
                    release_if_unheld(next, previous_id);
                }
            }
        }

        next.used_mut().insert(id);
        next.set_selection(None);
        debug!(pokemon = %pokemon.name(), %position, "Placed");
    }
}

/// Removes `id` from the used set unless some cell still holds it.
fn release_if_unheld(state: &mut GameState, id: PokemonId) {
    if state.grid().count_of(id) == 0 {
        state.used_mut().remove(&id);
    } else {
        debug!(%id, "Identifier still held by another cell, keeping it used");
    }
}

/// Applies an action with the default engine ([`OverwritePolicy::Retain`]).
pub fn apply(state: &Arc<GameState>, action: &Action) -> Result<Arc<GameState>, TransitionError> {
    GridEngine::default().apply(state, action)
}
