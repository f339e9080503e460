//! Polyomino Grid Puzzle Library
//!
//! Provides the placement and transformation engine for a grid-filling
//! puzzle: a rectangular grid must be covered completely using a fixed set of
//! polyominoes, some of which are pre-placed and locked. Rendering and input
//! handling live outside the library; a front end drives a [`Session`] through
//! plain method calls and re-renders its grid and tray snapshots afterwards.

pub mod geometry;
pub mod grid;
pub mod levels;
pub mod persistence;
pub mod placement;
pub mod session;
pub mod shapes;

pub use geometry::{transform, Orientation, Pattern};
pub use grid::{Cell, Grid};
pub use levels::{LevelDef, LevelError, LevelPack, LockedPiece};
pub use placement::{can_place, Position};
pub use session::{Hint, Piece, PlacementOutcome, Session, SessionState};
pub use shapes::{ColorTag, Shape};
