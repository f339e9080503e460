//! Polyomino patterns and their rotation/flip transforms.
//!
//! A pattern is a rectangular 0/1 occupancy matrix. There are 8 possible
//! orientations of a planar piece: 4 quarter-turn rotations, each optionally
//! preceded by a horizontal mirror. Transforms never mutate the source pattern;
//! they always produce a new one.

use serde::{Deserialize, Serialize};

/// Number of distinct quarter-turn rotations.
pub const NUM_ROTATIONS: u8 = 4;

/// Errors produced when building a pattern from untrusted rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern has no rows or no columns")]
    Empty,
    #[error("pattern row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("pattern cell ({row}, {col}) is {value}, expected 0 or 1")]
    NotBinary { row: usize, col: usize, value: u8 },
    #[error("pattern has no filled cells")]
    NoCells,
}

/// Rectangular binary occupancy matrix, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Pattern {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Builds a pattern from nested rows of 0/1 flags.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, PatternError> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if cols == 0 {
            return Err(PatternError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(PatternError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => return Err(PatternError::NotBinary { row: r, col: c, value }),
                }
            }
        }

        if !cells.iter().any(|&filled| filled) {
            return Err(PatternError::NoCells);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the cell at (`row`, `col`) is set.
    ///
    /// Panics if the coordinate lies outside the pattern.
    #[inline]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        assert!(col < self.cols, "column {col} outside pattern");
        self.cells[row * self.cols + col]
    }

    /// Offsets `(row, col)` of every set cell, in row-major order.
    pub fn filled_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &filled)| filled)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    /// Number of set cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    /// Mirrors the pattern horizontally (each row reversed).
    pub fn flipped(&self) -> Self {
        let cells = self
            .cells
            .chunks(self.cols)
            .flat_map(|row| row.iter().rev().copied())
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Rotates the pattern 90 degrees clockwise.
    ///
    /// An R x C pattern becomes C x R with `rotated[c][R-1-r] = original[r][c]`.
    pub fn rotated_cw(&self) -> Self {
        let (rows, cols) = (self.rows, self.cols);
        let mut cells = vec![false; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                // the rotated pattern has `rows` columns
                cells[c * rows + (rows - 1 - r)] = self.cells[r * cols + c];
            }
        }
        Self {
            rows: cols,
            cols: rows,
            cells,
        }
    }

    /// Nested 0/1 rows, the inverse of [`Pattern::from_rows`].
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|&filled| u8::from(filled)).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Pattern {
    type Error = PatternError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Pattern::from_rows(&rows)
    }
}

impl From<Pattern> for Vec<Vec<u8>> {
    fn from(pattern: Pattern) -> Self {
        pattern.to_rows()
    }
}

/// A piece's transform state: quarter turns clockwise plus an optional mirror.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Quarter turns clockwise, always in `0..NUM_ROTATIONS`.
    pub rotation: u8,
    pub flipped: bool,
}

impl Orientation {
    pub fn new(rotation: u8, flipped: bool) -> Self {
        Self {
            rotation: rotation % NUM_ROTATIONS,
            flipped,
        }
    }

    /// The orientation after one more clockwise quarter turn.
    pub fn rotated(self) -> Self {
        Self::new(self.rotation + 1, self.flipped)
    }

    /// The orientation with the mirror toggled.
    pub fn toggled_flip(self) -> Self {
        Self {
            flipped: !self.flipped,
            ..self
        }
    }

    /// Applies this orientation to `pattern`.
    pub fn apply(self, pattern: &Pattern) -> Pattern {
        transform(pattern, self.rotation, self.flipped)
    }
}

/// Computes the transformed variant of a pattern.
///
/// The mirror (if any) is applied first, then `rotation_steps` clockwise
/// quarter turns. Steps are taken mod 4.
pub fn transform(pattern: &Pattern, rotation_steps: u8, flipped: bool) -> Pattern {
    let mut result = if flipped {
        pattern.flipped()
    } else {
        pattern.clone()
    };

    for _ in 0..rotation_steps % NUM_ROTATIONS {
        result = result.rotated_cw();
    }

    result
}
