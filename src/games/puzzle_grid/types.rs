//! Core domain types for the puzzle grid.

use super::invariants::{GridInvariants, InvariantSet};
use super::position::CellPosition;
use crate::catalog::{LevelId, Pokemon, PokemonId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Grid dimension used by the game.
pub const GRID_SIZE: usize = 3;

/// One addressable grid position holding at most one Pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Cell {
    /// Fixed coordinate of this cell.
    position: CellPosition,
    /// Occupant, if any.
    pokemon: Option<Arc<Pokemon>>,
}

impl Cell {
    /// Creates an empty cell at the given coordinate.
    pub fn empty(position: CellPosition) -> Self {
        Self {
            position,
            pokemon: None,
        }
    }

    /// Returns true if nothing is placed here.
    pub fn is_empty(&self) -> bool {
        self.pokemon.is_none()
    }

    /// Identifier of the occupant, if any.
    pub fn occupant_id(&self) -> Option<PokemonId> {
        self.pokemon.as_ref().map(|p| *p.id())
    }
}

/// A deserialized snapshot that breaks the grid's structural rules.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Malformed snapshot: {}", reason)]
pub struct SnapshotError {
    /// What was wrong.
    pub reason: String,
}

impl SnapshotError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Square grid of cells in row-major order.
///
/// Deserialization rejects grids that do not hold exactly one cell per
/// coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    /// Edge length.
    size: usize,
    /// Cells in row-major order (`size * size` entries).
    cells: Vec<Cell>,
    /// Number of cells holding each identifier, kept in step with `cells`.
    #[serde(skip)]
    occupancy: BTreeMap<PokemonId, usize>,
}

#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = SnapshotError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let mut grid = Self {
            size: raw.size,
            cells: raw.cells,
            occupancy: BTreeMap::new(),
        };
        if !grid.is_well_formed() {
            return Err(SnapshotError::new(format!(
                "grid of size {} must hold one cell per coordinate, got {} cells",
                grid.size,
                grid.cells.len()
            )));
        }
        for id in grid.cells.iter().filter_map(Cell::occupant_id) {
            *grid.occupancy.entry(id).or_default() += 1;
        }
        Ok(grid)
    }
}

impl Grid {
    /// Creates an empty `size` x `size` grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: CellPosition::all(size).into_iter().map(Cell::empty).collect(),
            occupancy: BTreeMap::new(),
        }
    }

    /// Returns true if there are `size * size` cells and each one carries
    /// the coordinate of its row-major index.
    pub fn is_well_formed(&self) -> bool {
        self.size.checked_mul(self.size) == Some(self.cells.len())
            && self
                .cells
                .iter()
                .enumerate()
                .all(|(idx, cell)| *cell.position() == CellPosition::from_index(idx, self.size))
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the cell at a coordinate, or `None` if out of bounds.
    pub fn get(&self, pos: CellPosition) -> Option<&Cell> {
        if pos.in_bounds(self.size) {
            self.cells.get(pos.to_index(self.size))
        } else {
            None
        }
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over the cells of one row. Yields nothing past the last row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Cell> {
        let cells: &[Cell] = if row < self.size {
            let start = row * self.size;
            self.cells.get(start..start + self.size).unwrap_or(&[])
        } else {
            &[]
        };
        cells.iter()
    }

    /// Number of cells currently holding the given identifier.
    pub fn count_of(&self, id: PokemonId) -> usize {
        self.occupancy.get(&id).copied().unwrap_or(0)
    }

    /// Identifiers of all current occupants.
    pub fn occupant_ids(&self) -> BTreeSet<PokemonId> {
        self.occupancy.keys().copied().collect()
    }

    /// Returns true if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Replaces the occupant at `pos` and returns the previous one.
    ///
    /// Callers validate bounds first; an out-of-bounds write is a no-op
    /// returning `None`.
    pub(super) fn replace(
        &mut self,
        pos: CellPosition,
        pokemon: Option<Arc<Pokemon>>,
    ) -> Option<Arc<Pokemon>> {
        if !pos.in_bounds(self.size) {
            return None;
        }
        let cell = self.cells.get_mut(pos.to_index(self.size))?;
        let incoming = pokemon.as_ref().map(|p| *p.id());
        let previous = std::mem::replace(&mut cell.pokemon, pokemon);

        if let Some(id) = previous.as_ref().map(|p| *p.id()) {
            if let Some(count) = self.occupancy.get_mut(&id) {
                *count -= 1;
                if *count == 0 {
                    self.occupancy.remove(&id);
                }
            }
        }
        if let Some(id) = incoming {
            *self.occupancy.entry(id).or_default() += 1;
        }
        previous
    }

    #[cfg(test)]
    pub(super) fn cells_mut(&mut self) -> &mut Vec<Cell> {
        &mut self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

/// Complete game state snapshot.
///
/// Snapshots are published as `Arc<GameState>` and never mutated after
/// publication; each transition builds a fresh value. Deserialization
/// rejects snapshots that break [`GridInvariants`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    /// The grid.
    grid: Grid,
    /// Currently focused cell.
    selection: Option<CellPosition>,
    /// Identifiers marked as placed.
    used: BTreeSet<PokemonId>,
    /// Active level.
    level: Option<LevelId>,
}

impl GameState {
    /// Creates the session-start state: empty grid, no selection, nothing
    /// used, no level.
    pub fn new() -> Self {
        Self {
            grid: create_initial_grid(),
            selection: None,
            used: BTreeSet::new(),
            level: None,
        }
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the selected cell.
    pub fn selection(&self) -> Option<CellPosition> {
        self.selection
    }

    /// Returns the used-identifier set.
    pub fn used(&self) -> &BTreeSet<PokemonId> {
        &self.used
    }

    /// Returns true if the identifier is marked as used.
    pub fn is_used(&self, id: PokemonId) -> bool {
        self.used.contains(&id)
    }

    /// Returns the active level.
    pub fn level(&self) -> Option<LevelId> {
        self.level
    }

    /// Shorthand for the occupant at a coordinate.
    pub fn pokemon_at(&self, pos: CellPosition) -> Option<&Arc<Pokemon>> {
        self.grid.get(pos).and_then(|c| c.pokemon().as_ref())
    }

    pub(super) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub(super) fn used_mut(&mut self) -> &mut BTreeSet<PokemonId> {
        &mut self.used
    }

    pub(super) fn set_selection(&mut self, selection: Option<CellPosition>) {
        self.selection = selection;
    }

    pub(super) fn set_level(&mut self, level: Option<LevelId>) {
        self.level = level;
    }

    /// Empties the grid, selection and used set, keeping the level.
    pub(super) fn clear_board(&mut self) {
        self.grid = Grid::new(self.grid.size());
        self.selection = None;
        self.used = BTreeSet::new();
    }
}

#[derive(Deserialize)]
struct RawGameState {
    grid: Grid,
    selection: Option<CellPosition>,
    used: BTreeSet<PokemonId>,
    level: Option<LevelId>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = SnapshotError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let state = Self {
            grid: raw.grid,
            selection: raw.selection,
            used: raw.used,
            level: raw.level,
        };
        GridInvariants::check_all(&state).map_err(|violations| {
            SnapshotError::new(
                violations
                    .iter()
                    .map(|v| v.description.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;
        Ok(state)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a fresh empty grid of [`GRID_SIZE`].
pub fn create_initial_grid() -> Grid {
    Grid::new(GRID_SIZE)
}

/// Creates a fresh session-start state.
pub fn create_initial_state() -> GameState {
    GameState::new()
}
