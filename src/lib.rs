//! Pokegrid library - grid state engine for a 3x3 Pokemon placement puzzle
//!
//! Players fill a 3x3 grid with Gen 1 Pokemon; each row and column carries a
//! criterion (type, dual type, evolution stage, or a known move). This crate
//! tracks what is placed where and which Pokemon are already used.
//!
//! # Architecture
//!
//! - **Engine**: pure transition function over immutable `GameState` snapshots
//! - **Catalog**: bundled Pokemon roster and level table
//! - **Session**: explicit per-player state holder with undo/redo
//! - **Script**: text command language used by the CLI
//!
//! # Example
//!
//! ```no_run
//! use pokegrid::{Action, CellPosition, GameSession, Pokedex};
//!
//! # fn example() -> anyhow::Result<()> {
//! let pokedex = Pokedex::load_bundled()?;
//! let mut session = GameSession::default();
//!
//! let bulbasaur = pokedex.by_name("bulbasaur").expect("bundled");
//! session.dispatch(Action::place(CellPosition::new(0, 0), bulbasaur))?;
//! assert_eq!(session.state().used().len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod catalog;
mod config;
mod games;
mod render;
mod script;
mod session;

// Crate-level exports - Catalog
pub use catalog::{
    CatalogError, Criteria, CriteriaKind, CriteriaValue, DEFAULT_SPRITE_CDN_URL, EvolutionStage,
    Level, LevelCatalog, LevelId, MAX_POKEMON_ID, Pokedex, Pokemon, PokemonId, PokemonType,
    sprite_url,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, SPRITE_CDN_ENV};

// Crate-level exports - Grid engine
pub use games::puzzle_grid::{
    Action, Cell, CellPosition, Contract, GRID_SIZE, GameState, Grid, GridEngine,
    OverwritePolicy, ParsePositionError, PositionInBounds, SnapshotError, TransitionContract,
    TransitionError, apply, create_initial_grid, create_initial_state,
};

// Crate-level exports - Invariants
pub use games::puzzle_grid::invariants::{
    GridInvariants, GridShapeInvariant, Invariant, InvariantSet, InvariantViolation,
    SelectionInBoundsInvariant, UsedCoversOccupantsInvariant, UsedMatchesOccupantsInvariant,
};

// Crate-level exports - Session, rendering, scripting
pub use render::render_board;
pub use script::{HELP, ScriptCommand, ScriptError, parse_line};
pub use session::GameSession;
