//! Placement validation and grid stamping.
//!
//! An anchor designates the grid coordinate of a pattern's top-left corner.
//! A pattern fits when every set cell, translated by the anchor, lands inside
//! the grid on an empty cell. Placement is all-or-nothing.

use serde::{Deserialize, Serialize};

use crate::geometry::Pattern;
use crate::grid::{Cell, Grid};

/// A grid coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Absolute coordinates of every set cell of `pattern` anchored at `anchor`.
///
/// Coordinates saturate at `usize::MAX`, which lies outside every grid.
pub fn footprint(pattern: &Pattern, anchor: Position) -> impl Iterator<Item = Position> + '_ {
    pattern.filled_offsets().map(move |(r, c)| {
        Position::new(anchor.row.saturating_add(r), anchor.col.saturating_add(c))
    })
}

/// Returns whether `pattern` fits at `anchor` without leaving the grid or
/// touching an occupied cell.
pub fn can_place(grid: &Grid, pattern: &Pattern, anchor: Position) -> bool {
    footprint(pattern, anchor).all(|pos| {
        // check bounds before touching the grid
        grid.contains(pos.row, pos.col) && grid.cell_at(pos.row, pos.col).is_empty()
    })
}

/// Writes `cell` into every footprint coordinate of `pattern` at `anchor`.
///
/// Callers must have validated the placement with [`can_place`].
pub fn stamp(grid: &mut Grid, pattern: &Pattern, anchor: Position, cell: Cell) {
    for pos in footprint(pattern, anchor) {
        grid.set_cell(pos.row, pos.col, cell);
    }
}
