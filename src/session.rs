//! Per-session state holder.
//!
//! A [`GameSession`] is created once when a player starts and is passed
//! explicitly to whatever drives input. It owns the engine, the current
//! snapshot, and the snapshots needed for undo and redo.

use crate::games::puzzle_grid::{Action, GameState, GridEngine, TransitionError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A single player's game session.
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: GridEngine,
    current: Arc<GameState>,
    past: Vec<Arc<GameState>>,
    future: Vec<Arc<GameState>>,
}

impl GameSession {
    /// Creates a session at the initial state.
    #[instrument]
    pub fn new(engine: GridEngine) -> Self {
        info!(policy = %engine.policy(), "Creating new game session");
        Self {
            engine,
            current: Arc::new(GameState::new()),
            past: Vec::new(),
            future: Vec::new(),
        }
    }

    /// Returns the current snapshot.
    pub fn state(&self) -> &Arc<GameState> {
        &self.current
    }

    /// Returns the engine.
    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    /// Applies an action and makes the result current.
    ///
    /// A no-op transition (same snapshot returned) is not recorded in
    /// history and leaves the redo stack alone.
    ///
    /// # Errors
    ///
    /// Propagates [`TransitionError`] from the engine; the session is left
    /// unchanged on error.
    #[instrument(skip(self, action), fields(action = %action))]
    pub fn dispatch(&mut self, action: Action) -> Result<&Arc<GameState>, TransitionError> {
        let next = self.engine.apply(&self.current, &action)?;
        if Arc::ptr_eq(&next, &self.current) {
            debug!("Transition was a no-op");
            return Ok(&self.current);
        }

        let previous = std::mem::replace(&mut self.current, next);
        self.past.push(previous);
        self.future.clear();
        debug!(history = self.past.len(), "Dispatched");
        Ok(&self.current)
    }

    /// Steps back one snapshot. Returns false if there is nothing to undo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                let undone = std::mem::replace(&mut self.current, previous);
                self.future.push(undone);
                true
            }
            None => false,
        }
    }

    /// Re-applies one undone snapshot. Returns false if there is nothing to redo.
    #[instrument(skip(self))]
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let previous = std::mem::replace(&mut self.current, next);
                self.past.push(previous);
                true
            }
            None => false,
        }
    }

    /// Number of snapshots available to undo.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of snapshots available to redo.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GridEngine::default())
    }
}
