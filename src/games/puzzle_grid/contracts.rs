//! Contract-based validation for grid transitions.
//!
//! Contracts formalize Hoare-style reasoning around [`GridEngine::apply`]:
//! {P(state, action)} apply {Q(before, after)}.
//!
//! [`GridEngine::apply`]: super::GridEngine::apply

use super::action::{Action, TransitionError};
use super::engine::OverwritePolicy;
use super::invariants::{
    GridInvariants, Invariant, InvariantSet, InvariantViolation, UsedMatchesOccupantsInvariant,
};
use super::types::GameState;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), TransitionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), TransitionError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: any coordinate the action addresses lies inside the grid.
pub struct PositionInBounds;

impl PositionInBounds {
    /// Validates the action's coordinate against the grid size.
    #[instrument(skip(state))]
    pub fn check(action: &Action, state: &GameState) -> Result<(), TransitionError> {
        let size = state.grid().size();
        match action.position() {
            Some(position) if !position.in_bounds(size) => {
                warn!(%position, size, "Rejected out-of-bounds action");
                Err(TransitionError::OutOfBounds { position, size })
            }
            _ => Ok(()),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for every grid transition.
///
/// Preconditions:
/// - Addressed coordinate is in bounds
///
/// Postconditions:
/// - Grid shape unchanged
/// - Selection in bounds
/// - Every occupant is marked used
pub struct TransitionContract;

impl Contract<GameState, Action> for TransitionContract {
    fn pre(state: &GameState, action: &Action) -> Result<(), TransitionError> {
        PositionInBounds::check(action, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), TransitionError> {
        if before.grid().size() != after.grid().size() {
            return Err(TransitionError::InvariantViolation(format!(
                "Postcondition failed: grid size changed from {} to {}",
                before.grid().size(),
                after.grid().size()
            )));
        }
        GridInvariants::check_all(after).map_err(into_transition_error)
    }
}

impl TransitionContract {
    /// Runs [`Contract::post`] plus the checks specific to `policy`.
    ///
    /// Under [`OverwritePolicy::Release`] a transition must not introduce a
    /// stale id: if the used set matched the occupants exactly before, it
    /// must still match after. Stale ids already present (for example from
    /// a state built under `Retain`) are carried along, not rejected.
    pub fn post_with_policy(
        before: &GameState,
        after: &GameState,
        policy: OverwritePolicy,
    ) -> Result<(), TransitionError> {
        Self::post(before, after)?;
        if policy == OverwritePolicy::Release
            && UsedMatchesOccupantsInvariant::holds(before)
            && !UsedMatchesOccupantsInvariant::holds(after)
        {
            return Err(into_transition_error(vec![InvariantViolation::new(
                UsedMatchesOccupantsInvariant::description(),
            )]));
        }
        Ok(())
    }
}

fn into_transition_error(violations: Vec<InvariantViolation>) -> TransitionError {
    let descriptions = violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    TransitionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
}
