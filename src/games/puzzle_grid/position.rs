//! Cell coordinates on the puzzle grid.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A (row, col) coordinate, 0-indexed.
///
/// Coordinates are plain data: they are not tied to a particular grid, so
/// bounds are checked against a grid's size when an action is applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_new::new,
)]
pub struct CellPosition {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl CellPosition {
    /// Returns true if the coordinate lies inside a `size` x `size` grid.
    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Row-major index into a `size`-wide grid.
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of [`CellPosition::to_index`].
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// All coordinates of a `size` x `size` grid in row-major order.
    #[instrument]
    pub fn all(size: usize) -> Vec<CellPosition> {
        (0..size * size).map(|i| Self::from_index(i, size)).collect()
    }
}

/// Error parsing a coordinate from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid cell position '{}': expected 'row,col'", _0)]
pub struct ParsePositionError(String);

impl std::error::Error for ParsePositionError {}

impl FromStr for CellPosition {
    type Err = ParsePositionError;

    /// Accepts `"r,c"` or `"r c"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        match parts.as_slice() {
            [row, col] => {
                let row = row.parse().map_err(|_| ParsePositionError(s.to_string()))?;
                let col = col.parse().map_err(|_| ParsePositionError(s.to_string()))?;
                Ok(Self { row, col })
            }
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

impl std::fmt::Display for CellPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
