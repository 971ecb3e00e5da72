//! Game implementations.

pub mod puzzle_grid;
