//! Grid state for the puzzle board.
//!
//! The grid is a flat row-major array of [`Cell`]s sized by the active level.
//! Accessors do not bounds-check beyond slice indexing: callers validate
//! coordinates first (see [`crate::placement`]).

use crate::shapes::ColorTag;

/// A single board cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    /// Covered by a piece.
    ///
    /// `owner` is the tray index for player pieces and the locked-piece index
    /// for locked pieces; `locked` tells the two id spaces apart.
    Occupied {
        owner: usize,
        color: ColorTag,
        locked: bool,
    },
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        matches!(self, Cell::Occupied { locked: true, .. })
    }

    /// Returns the tray index owning this cell, if a player piece covers it.
    #[inline]
    pub fn tray_owner(&self) -> Option<usize> {
        match *self {
            Cell::Occupied {
                owner,
                locked: false,
                ..
            } => Some(owner),
            _ => None,
        }
    }
}

/// Rectangular board of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Converts (row, col) to a linear cell index.
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(col < self.cols, "column {col} outside grid");
        row * self.cols + col
    }

    /// Returns whether (`row`, `col`) lies inside the grid.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    #[inline]
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        self.set_cell(row, col, Cell::Empty);
    }

    /// Iterates `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| (idx / cols, idx % cols, cell))
    }

    /// Clears every unlocked cell owned by tray piece `owner`.
    ///
    /// Returns the number of cells cleared.
    pub fn clear_owner(&mut self, owner: usize) -> usize {
        let mut cleared = 0;
        for cell in &mut self.cells {
            if cell.tray_owner() == Some(owner) {
                *cell = Cell::Empty;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }
}

/// Formats a grid as a human-readable string, one line per row.
///
/// Empty cells show as '.', locked cells as '#', player pieces as their
/// 1-based tray slot (hex for slots >= 10).
pub fn format_grid(grid: &Grid) -> String {
    let mut output = String::with_capacity(grid.rows() * (grid.cols() + 1));

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let display_char = match grid.cell_at(row, col) {
                Cell::Empty => '.',
                Cell::Occupied { locked: true, .. } => '#',
                Cell::Occupied { owner, .. } => slot_char(owner),
            };
            output.push(display_char);
        }
        output.push('\n');
    }

    output
}

/// Display character for a 0-based tray index.
pub fn slot_char(owner: usize) -> char {
    let slot = owner + 1;
    if slot < 10 {
        char::from(b'0' + slot as u8)
    } else if slot < 36 {
        char::from(b'A' + (slot - 10) as u8)
    } else {
        '?'
    }
}
