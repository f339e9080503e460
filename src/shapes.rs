//! Polyomino shape definitions.
//!
//! Each shape is a binary occupancy pattern plus a name and a color tag the
//! presentation layer maps to an actual color.

use serde::{Deserialize, Serialize};

use crate::geometry::Pattern;

/// Presentation color index of a shape.
pub type ColorTag = u8;

/// A named polyomino template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub name: String,
    pub pattern: Pattern,
    pub color: ColorTag,
}

impl Shape {
    /// Number of unit cells the shape covers.
    pub fn cell_count(&self) -> usize {
        self.pattern.cell_count()
    }
}

/// Compile-time shape table entry.
struct ShapeDef {
    name: &'static str,
    rows: &'static [&'static [u8]],
    color: ColorTag,
}

/// The ten built-in shapes, indexed by level data.
const SHAPE_DEFS: &[ShapeDef] = &[
    // L tetromino
    ShapeDef {
        name: "L1",
        rows: &[&[1, 1, 1], &[1, 0, 0]],
        color: 0,
    },
    // L tetromino, standing
    ShapeDef {
        name: "L2",
        rows: &[&[1, 1], &[0, 1], &[0, 1]],
        color: 1,
    },
    ShapeDef {
        name: "T",
        rows: &[&[1, 1, 1], &[0, 1, 0]],
        color: 2,
    },
    ShapeDef {
        name: "Z",
        rows: &[&[1, 1, 0], &[0, 1, 1]],
        color: 3,
    },
    ShapeDef {
        name: "S",
        rows: &[&[0, 1, 1], &[1, 1, 0]],
        color: 4,
    },
    // straight tromino (3 cells)
    ShapeDef {
        name: "I3",
        rows: &[&[1, 1, 1]],
        color: 5,
    },
    ShapeDef {
        name: "I4",
        rows: &[&[1, 1, 1, 1]],
        color: 6,
    },
    ShapeDef {
        name: "O",
        rows: &[&[1, 1], &[1, 1]],
        color: 7,
    },
    // P pentomino (5 cells)
    ShapeDef {
        name: "P",
        rows: &[&[1, 1], &[1, 1], &[1, 0]],
        color: 8,
    },
    // U pentomino (5 cells)
    ShapeDef {
        name: "U",
        rows: &[&[1, 0, 1], &[1, 1, 1]],
        color: 9,
    },
];

/// Index constants for the built-in catalog.
pub const L1: usize = 0;
pub const L2: usize = 1;
pub const T: usize = 2;
pub const Z: usize = 3;
pub const S: usize = 4;
pub const I3: usize = 5;
pub const I4: usize = 6;
pub const O: usize = 7;
pub const P: usize = 8;
pub const U: usize = 9;

/// Builds the built-in shape catalog.
pub fn builtin_shapes() -> Vec<Shape> {
    SHAPE_DEFS
        .iter()
        .map(|def| Shape {
            name: def.name.to_owned(),
            pattern: Pattern::from_rows(def.rows).unwrap_or_else(|err| {
                panic!("built-in shape {} is malformed: {err}", def.name)
            }),
            color: def.color,
        })
        .collect()
}
