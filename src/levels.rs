//! Level definitions, the built-in level pack, and pack validation.
//!
//! A level is a grid size, a set of locked pieces pre-placed at load time, and
//! the shapes handed to the player. Levels must offer at least as many piece
//! cells as the grid has cells; any surplus is slack the player leaves unused.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::geometry::{transform, NUM_ROTATIONS};
use crate::grid::{Cell, Grid};
use crate::placement::{can_place, stamp, Position};
use crate::shapes::{builtin_shapes, Shape, I3, I4, L1, L2, O, P, S, T, U, Z};

/// Largest grid, in cells, a level may declare.
pub const MAX_GRID_CELLS: usize = 4096;

/// Errors found while validating a level pack.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("level pack has no shapes")]
    NoShapes,
    #[error("level pack has no levels")]
    NoLevels,
    #[error("shape {shape} has an empty name")]
    EmptyShapeName { shape: usize },
    #[error("shape name {0:?} is used more than once")]
    DuplicateShapeName(String),
    #[error("level {}: grid must have at least one row and one column", .level + 1)]
    EmptyGrid { level: usize },
    #[error("level {}: {rows}x{cols} grid exceeds {} cells", .level + 1, MAX_GRID_CELLS)]
    GridTooLarge {
        level: usize,
        rows: usize,
        cols: usize,
    },
    #[error("level {}: shape index {shape} does not exist", .level + 1)]
    UnknownShape { level: usize, shape: usize },
    #[error("level {}: locked piece {piece} has rotation {rotation}, expected 0..=3", .level + 1)]
    InvalidRotation {
        level: usize,
        piece: usize,
        rotation: u8,
    },
    #[error("level {}: locked piece {piece} extends outside the grid", .level + 1)]
    LockedOutOfBounds { level: usize, piece: usize },
    #[error("level {}: locked piece {piece} overlaps another locked piece", .level + 1)]
    LockedOverlap { level: usize, piece: usize },
    #[error("level {}: {piece_cells} piece cells cannot fill {grid_cells} grid cells", .level + 1)]
    Unfillable {
        level: usize,
        grid_cells: usize,
        piece_cells: usize,
    },
}

/// A piece pre-placed when the level loads. Never movable by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPiece {
    /// Index into the pack's shape list.
    pub shape: usize,
    pub anchor: Position,
    /// Clockwise quarter turns; locked pieces are never mirrored.
    #[serde(default)]
    pub rotation: u8,
}

/// Static description of one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub locked_pieces: Vec<LockedPiece>,
    /// Shape indices handed to the player, in tray order.
    pub available_shapes: Vec<usize>,
}

/// Cell accounting for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBudget {
    pub grid: usize,
    pub locked: usize,
    pub available: usize,
}

impl CellBudget {
    /// Piece cells left over once the grid is full. Negative when unfillable.
    pub fn slack(&self) -> isize {
        (self.locked + self.available) as isize - self.grid as isize
    }
}

impl LevelDef {
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Counts grid, locked and available cells against `shapes`.
    ///
    /// Unknown shape indices count as zero cells.
    pub fn budget(&self, shapes: &[Shape]) -> CellBudget {
        let cells = |shape: usize| shapes.get(shape).map_or(0, Shape::cell_count);
        CellBudget {
            grid: self.cell_count(),
            locked: self.locked_pieces.iter().map(|p| cells(p.shape)).sum(),
            available: self.available_shapes.iter().map(|&s| cells(s)).sum(),
        }
    }

    /// Builds the grid holding only this level's locked pieces.
    ///
    /// `level` is only used to label errors.
    pub fn locked_grid(&self, shapes: &[Shape], level: usize) -> Result<Grid, LevelError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LevelError::EmptyGrid { level });
        }
        if self.cell_count() > MAX_GRID_CELLS {
            return Err(LevelError::GridTooLarge {
                level,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut grid = Grid::new(self.rows, self.cols);
        for (piece, locked) in self.locked_pieces.iter().enumerate() {
            let shape = shapes.get(locked.shape).ok_or(LevelError::UnknownShape {
                level,
                shape: locked.shape,
            })?;
            if locked.rotation >= NUM_ROTATIONS {
                return Err(LevelError::InvalidRotation {
                    level,
                    piece,
                    rotation: locked.rotation,
                });
            }

            let pattern = transform(&shape.pattern, locked.rotation, false);
            if !can_place(&grid, &pattern, locked.anchor) {
                let fits = |len: usize, start: usize, bound: usize| {
                    start.checked_add(len).is_some_and(|end| end <= bound)
                };
                let inside = fits(pattern.rows(), locked.anchor.row, self.rows)
                    && fits(pattern.cols(), locked.anchor.col, self.cols);
                return Err(if inside {
                    LevelError::LockedOverlap { level, piece }
                } else {
                    LevelError::LockedOutOfBounds { level, piece }
                });
            }

            stamp(
                &mut grid,
                &pattern,
                locked.anchor,
                Cell::Occupied {
                    owner: piece,
                    color: shape.color,
                    locked: true,
                },
            );
        }

        Ok(grid)
    }

    /// Checks this level against the shape list.
    pub fn validate(&self, shapes: &[Shape], level: usize) -> Result<(), LevelError> {
        self.locked_grid(shapes, level)?;

        if let Some(&shape) = self.available_shapes.iter().find(|&&s| s >= shapes.len()) {
            return Err(LevelError::UnknownShape { level, shape });
        }

        let budget = self.budget(shapes);
        if budget.slack() < 0 {
            return Err(LevelError::Unfillable {
                level,
                grid_cells: budget.grid,
                piece_cells: budget.locked + budget.available,
            });
        }

        Ok(())
    }
}

/// A shape catalog together with the levels that index into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPack {
    pub shapes: Vec<Shape>,
    pub levels: Vec<LevelDef>,
}

impl LevelPack {
    /// The built-in shapes and levels.
    pub fn builtin() -> Self {
        Self {
            shapes: builtin_shapes(),
            levels: builtin_levels(),
        }
    }

    /// Validates shapes and every level.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.shapes.is_empty() {
            return Err(LevelError::NoShapes);
        }
        if self.levels.is_empty() {
            return Err(LevelError::NoLevels);
        }

        let mut names: FxHashSet<&str> = FxHashSet::default();
        for (idx, shape) in self.shapes.iter().enumerate() {
            if shape.name.trim().is_empty() {
                return Err(LevelError::EmptyShapeName { shape: idx });
            }
            if !names.insert(shape.name.as_str()) {
                return Err(LevelError::DuplicateShapeName(shape.name.clone()));
            }
        }

        for (idx, level) in self.levels.iter().enumerate() {
            level.validate(&self.shapes, idx)?;
        }

        Ok(())
    }
}

/// Compile-time level table entry.
struct LevelTemplate {
    rows: usize,
    cols: usize,
    /// `(shape, row, col, rotation)` per locked piece.
    locked: &'static [(usize, usize, usize, u8)],
    available: &'static [usize],
}

const LEVELS: &[LevelTemplate] = &[
    // 5x5: 4 locked + 21 available
    LevelTemplate {
        rows: 5,
        cols: 5,
        locked: &[(L1, 0, 0, 0)],
        available: &[L2, T, Z, S, P],
    },
    LevelTemplate {
        rows: 5,
        cols: 5,
        locked: &[(O, 0, 0, 0)],
        available: &[L1, L2, T, Z, P],
    },
    LevelTemplate {
        rows: 5,
        cols: 5,
        locked: &[(T, 0, 0, 0)],
        available: &[L1, L2, Z, S, P],
    },
    LevelTemplate {
        rows: 5,
        cols: 5,
        locked: &[(Z, 0, 0, 0)],
        available: &[L1, L2, T, S, P],
    },
    LevelTemplate {
        rows: 5,
        cols: 5,
        locked: &[(S, 0, 0, 0)],
        available: &[L1, L2, T, Z, P],
    },
    // 6x5: 30 cells
    LevelTemplate {
        rows: 6,
        cols: 5,
        locked: &[(P, 0, 0, 0)],
        available: &[L1, L2, T, Z, S, U],
    },
    LevelTemplate {
        rows: 6,
        cols: 5,
        locked: &[(U, 0, 0, 0)],
        available: &[L1, L2, T, Z, S, P],
    },
    LevelTemplate {
        rows: 6,
        cols: 5,
        locked: &[(L1, 0, 0, 0)],
        available: &[L2, T, Z, S, P, U],
    },
    LevelTemplate {
        rows: 6,
        cols: 5,
        locked: &[(L2, 0, 0, 0)],
        available: &[L1, T, Z, S, P, U],
    },
    LevelTemplate {
        rows: 6,
        cols: 5,
        locked: &[(T, 0, 0, 0)],
        available: &[L1, L2, Z, S, P, U],
    },
    // 6x6: two locked pieces
    LevelTemplate {
        rows: 6,
        cols: 6,
        locked: &[(L1, 0, 0, 0), (O, 3, 3, 0)],
        available: &[L2, T, Z, S, I3, I4, P],
    },
    LevelTemplate {
        rows: 6,
        cols: 6,
        locked: &[(P, 0, 0, 0), (I3, 4, 2, 0)],
        available: &[L1, L2, T, Z, S, I4, O],
    },
    LevelTemplate {
        rows: 6,
        cols: 6,
        locked: &[(U, 0, 0, 0), (I4, 4, 2, 0)],
        available: &[L1, L2, T, Z, S, I3, O],
    },
    LevelTemplate {
        rows: 6,
        cols: 6,
        locked: &[(L2, 0, 0, 0), (T, 3, 3, 0)],
        available: &[L1, Z, S, I3, I4, O, P],
    },
    LevelTemplate {
        rows: 6,
        cols: 6,
        locked: &[(Z, 0, 0, 0), (S, 3, 3, 0)],
        available: &[L1, L2, T, I3, I4, O, P],
    },
    // 7x6: 42 cells; each tray ends with a spare P
    LevelTemplate {
        rows: 7,
        cols: 6,
        locked: &[(L1, 0, 0, 0)],
        available: &[L2, T, Z, S, I3, I4, O, P, U, P],
    },
    LevelTemplate {
        rows: 7,
        cols: 6,
        locked: &[(L2, 0, 0, 0)],
        available: &[L1, T, Z, S, I3, I4, O, P, U, P],
    },
    LevelTemplate {
        rows: 7,
        cols: 6,
        locked: &[(I3, 0, 0, 0)],
        available: &[L1, L2, T, Z, S, I4, O, P, U, P],
    },
    LevelTemplate {
        rows: 7,
        cols: 6,
        locked: &[(P, 0, 0, 0)],
        available: &[L1, L2, T, Z, S, I3, I4, O, U, P],
    },
    // upside down so the U does not wall off (0, 1)
    LevelTemplate {
        rows: 7,
        cols: 6,
        locked: &[(U, 0, 0, 2)],
        available: &[L1, L2, T, Z, S, I3, I4, O, P, P],
    },
];

/// Builds the built-in levels.
pub fn builtin_levels() -> Vec<LevelDef> {
    LEVELS
        .iter()
        .map(|template| LevelDef {
            rows: template.rows,
            cols: template.cols,
            locked_pieces: template
                .locked
                .iter()
                .map(|&(shape, row, col, rotation)| LockedPiece {
                    shape,
                    anchor: Position::new(row, col),
                    rotation,
                })
                .collect(),
            available_shapes: template.available.to_vec(),
        })
        .collect()
}
