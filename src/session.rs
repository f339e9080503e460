//! Level session: the state machine driving one play-through of a level pack.
//!
//! The session owns the grid, the piece tray and the current selection. All
//! player actions are forgiving: anything that does not apply in the current
//! state (a rejected placement, a removal on an empty or locked cell, moving
//! past the last level) is ignored rather than reported as an error.

use log::{debug, info};

use crate::geometry::{Orientation, Pattern};
use crate::grid::{Cell, Grid};
use crate::levels::{LevelDef, LevelError, LevelPack};
use crate::placement::{can_place, stamp, Position};
use crate::shapes::Shape;

/// Lifecycle of the active level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Active,
    Won,
}

/// A tray piece: an instance of a shape the player can move around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// Index into the pack's shape list.
    pub shape: usize,
    pub orientation: Orientation,
    pub placed: bool,
}

impl Piece {
    fn new(shape: usize) -> Self {
        Self {
            shape,
            orientation: Orientation::default(),
            placed: false,
        }
    }
}

/// Result of [`Session::attempt_placement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Nothing changed.
    Rejected,
    Placed,
    /// The placement filled the grid.
    Won,
}

/// Result of [`Session::request_hint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    /// The first unplaced piece fits at this anchor as currently oriented.
    Place {
        shape_name: String,
        row: usize,
        col: usize,
    },
    /// The first unplaced piece fits nowhere as currently oriented.
    TryTransforming { shape_name: String },
    /// Every tray piece is already on the grid.
    AllPlaced,
}

/// One player's session over a level pack.
#[derive(Debug, Clone)]
pub struct Session {
    pack: LevelPack,
    current_level: usize,
    grid: Grid,
    tray: Vec<Piece>,
    selected: Option<usize>,
    state: SessionState,
}

impl Session {
    /// Starts a session on the first level of the built-in pack.
    pub fn new() -> Self {
        Self::with_pack_unchecked(LevelPack::builtin())
    }

    /// Validates `pack` and starts a session on its first level.
    pub fn with_pack(pack: LevelPack) -> Result<Self, LevelError> {
        pack.validate()?;
        Ok(Self::with_pack_unchecked(pack))
    }

    fn with_pack_unchecked(pack: LevelPack) -> Self {
        let mut session = Self {
            pack,
            current_level: 0,
            grid: Grid::new(0, 0),
            tray: Vec::new(),
            selected: None,
            state: SessionState::Loading,
        };
        session.load_level(0);
        session
    }

    pub fn pack(&self) -> &LevelPack {
        &self.pack
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tray(&self) -> &[Piece] {
        &self.tray
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn level_count(&self) -> usize {
        self.pack.levels.len()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Definition of the current level.
    pub fn level(&self) -> &LevelDef {
        &self.pack.levels[self.current_level]
    }

    /// The shape a tray piece was made from.
    pub fn shape_of(&self, piece: &Piece) -> &Shape {
        &self.pack.shapes[piece.shape]
    }

    /// The pattern of tray piece `index` in its current orientation.
    pub fn piece_pattern(&self, index: usize) -> Option<Pattern> {
        let piece = self.tray.get(index)?;
        Some(piece.orientation.apply(&self.shape_of(piece).pattern))
    }

    /// Loads level `index`, discarding all progress on the current one.
    ///
    /// Returns false, leaving the session untouched, when `index` is out of
    /// range.
    pub fn load_level(&mut self, index: usize) -> bool {
        let Some(level) = self.pack.levels.get(index) else {
            debug!("ignoring load of level {index}: pack has {}", self.pack.levels.len());
            return false;
        };

        self.state = SessionState::Loading;
        self.current_level = index;

        let mut grid = Grid::new(level.rows, level.cols);
        for (owner, locked) in level.locked_pieces.iter().enumerate() {
            let shape = &self.pack.shapes[locked.shape];
            let pattern = Orientation::new(locked.rotation, false).apply(&shape.pattern);
            stamp(
                &mut grid,
                &pattern,
                locked.anchor,
                Cell::Occupied {
                    owner,
                    color: shape.color,
                    locked: true,
                },
            );
        }
        self.grid = grid;
        self.tray = level.available_shapes.iter().map(|&shape| Piece::new(shape)).collect();
        self.selected = None;

        info!(
            "loaded level {} ({}x{}, {} locked, {} in tray)",
            index + 1,
            level.rows,
            level.cols,
            level.locked_pieces.len(),
            self.tray.len()
        );
        self.state = SessionState::Active;
        true
    }

    /// Reloads the current level from its definition.
    pub fn reset_current_level(&mut self) {
        self.load_level(self.current_level);
    }

    /// Moves `delta` levels forward (or backward when negative).
    ///
    /// Out-of-range targets are ignored.
    pub fn change_level(&mut self, delta: isize) -> bool {
        match self.current_level.checked_add_signed(delta) {
            Some(target) if target < self.level_count() => self.load_level(target),
            _ => {
                debug!("ignoring level change by {delta} from level {}", self.current_level + 1);
                false
            }
        }
    }

    /// Returns the tray piece at `index` if the session is active and the
    /// piece is not on the grid.
    fn unplaced_mut(&mut self, index: usize) -> Option<&mut Piece> {
        if self.state != SessionState::Active {
            return None;
        }
        self.tray.get_mut(index).filter(|piece| !piece.placed)
    }

    /// Selects tray piece `index` for the next placement.
    pub fn select_piece(&mut self, index: usize) -> bool {
        if self.unplaced_mut(index).is_none() {
            debug!("ignoring selection of tray slot {index}");
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Turns tray piece `index` a quarter turn clockwise.
    pub fn rotate_piece(&mut self, index: usize) -> bool {
        match self.unplaced_mut(index) {
            Some(piece) => {
                piece.orientation = piece.orientation.rotated();
                debug!("tray slot {index} rotated to {}", piece.orientation.rotation);
                true
            }
            None => false,
        }
    }

    /// Toggles the mirror of tray piece `index`.
    pub fn flip_piece(&mut self, index: usize) -> bool {
        match self.unplaced_mut(index) {
            Some(piece) => {
                piece.orientation = piece.orientation.toggled_flip();
                debug!("tray slot {index} flipped: {}", piece.orientation.flipped);
                true
            }
            None => false,
        }
    }

    /// Places the selected piece with its top-left corner at (`row`, `col`).
    ///
    /// On success the piece is marked placed, the selection cleared and
    /// victory re-checked. An invalid placement changes nothing.
    pub fn attempt_placement(&mut self, row: usize, col: usize) -> PlacementOutcome {
        if self.state != SessionState::Active {
            return PlacementOutcome::Rejected;
        }
        let Some(index) = self.selected else {
            return PlacementOutcome::Rejected;
        };
        if !self.grid.contains(row, col) {
            debug!("ignoring placement at ({row}, {col}) outside the grid");
            return PlacementOutcome::Rejected;
        }
        let piece = self.tray[index];
        if piece.placed {
            return PlacementOutcome::Rejected;
        }

        let shape = &self.pack.shapes[piece.shape];
        let pattern = piece.orientation.apply(&shape.pattern);
        let anchor = Position::new(row, col);
        if !can_place(&self.grid, &pattern, anchor) {
            debug!("rejected {} at ({row}, {col})", shape.name);
            return PlacementOutcome::Rejected;
        }

        stamp(
            &mut self.grid,
            &pattern,
            anchor,
            Cell::Occupied {
                owner: index,
                color: shape.color,
                locked: false,
            },
        );
        info!("placed {} from tray slot {index} at ({row}, {col})", shape.name);
        self.tray[index].placed = true;
        self.selected = None;

        if self.check_victory() {
            PlacementOutcome::Won
        } else {
            PlacementOutcome::Placed
        }
    }

    /// Lifts the player piece covering (`row`, `col`) back into the tray.
    ///
    /// Does nothing while a piece is selected, or when the cell is empty,
    /// locked or outside the grid.
    pub fn remove_at(&mut self, row: usize, col: usize) -> bool {
        if self.state != SessionState::Active || self.selected.is_some() {
            return false;
        }
        if !self.grid.contains(row, col) {
            return false;
        }
        let Some(owner) = self.grid.cell_at(row, col).tray_owner() else {
            return false;
        };

        let cleared = self.grid.clear_owner(owner);
        if let Some(piece) = self.tray.get_mut(owner) {
            piece.placed = false;
        }
        info!("removed tray slot {owner} ({cleared} cells)");
        true
    }

    /// Routes a click on a grid cell: places the selected piece there, or
    /// removes the piece under the cursor when nothing is selected.
    pub fn click(&mut self, row: usize, col: usize) -> PlacementOutcome {
        if self.selected.is_none() {
            self.remove_at(row, col);
            PlacementOutcome::Rejected
        } else {
            self.attempt_placement(row, col)
        }
    }

    /// Transitions to [`SessionState::Won`] when every grid cell is occupied.
    fn check_victory(&mut self) -> bool {
        if !self.grid.is_full() {
            return false;
        }
        let unused = self.tray.iter().filter(|piece| !piece.placed).count();
        info!("level {} complete ({unused} pieces unused)", self.current_level + 1);
        self.state = SessionState::Won;
        true
    }

    /// Suggests where the first unplaced piece fits in its current orientation.
    ///
    /// This is a single row-major scan for one piece, not a solver: the
    /// suggested spot may still lead to a dead end.
    pub fn request_hint(&self) -> Hint {
        let Some(piece) = self.tray.iter().find(|piece| !piece.placed) else {
            return Hint::AllPlaced;
        };
        let shape = self.shape_of(piece);
        let pattern = piece.orientation.apply(&shape.pattern);

        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                if can_place(&self.grid, &pattern, Position::new(row, col)) {
                    return Hint::Place {
                        shape_name: shape.name.clone(),
                        row,
                        col,
                    };
                }
            }
        }

        Hint::TryTransforming {
            shape_name: shape.name.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LockedPiece;
    use crate::shapes::{builtin_shapes, I3, I4, L1, O};

    /// One tiling of built-in level 1 as `(tray slot, rotation, flipped, row, col)`.
    ///
    /// Final board:
    /// ```text
    /// ###31
    /// #4331
    /// 44311
    /// 42555
    /// 22255
    /// ```
    const LEVEL_ONE_SOLUTION: &[(usize, u8, bool, usize, usize)] = &[
        (2, 1, false, 0, 2),
        (0, 2, true, 0, 3),
        (3, 1, true, 1, 0),
        (1, 2, false, 3, 0),
        (4, 1, false, 3, 2),
    ];

    /// Tilings of the 7x6 levels, indexed by level, in the same format.
    const SEVEN_BY_SIX_SOLUTIONS: &[(usize, &[(usize, u8, bool, usize, usize)])] = &[
        (
            15,
            &[
                (0, 0, false, 0, 3),
                (4, 1, false, 0, 5),
                (1, 0, false, 1, 1),
                (6, 0, false, 2, 0),
                (2, 1, false, 2, 2),
                (3, 0, false, 3, 3),
                (8, 1, false, 4, 0),
                (7, 2, false, 4, 4),
                (9, 1, false, 5, 1),
            ],
        ),
        (
            16,
            &[
                (0, 0, false, 0, 2),
                (1, 1, false, 0, 4),
                (4, 1, false, 1, 0),
                (2, 1, false, 1, 2),
                (3, 1, false, 2, 4),
                (8, 0, false, 3, 1),
                (7, 2, true, 4, 0),
                (9, 2, true, 4, 4),
                (6, 0, false, 5, 2),
            ],
        ),
        (
            17,
            &[
                (0, 0, false, 0, 3),
                (1, 0, false, 1, 0),
                (3, 1, true, 1, 2),
                (6, 0, false, 1, 4),
                (5, 1, false, 2, 0),
                (2, 2, false, 3, 1),
                (7, 0, false, 3, 4),
                (9, 1, true, 5, 0),
                (8, 0, false, 5, 3),
            ],
        ),
        (
            18,
            &[
                (0, 0, false, 0, 2),
                (1, 1, false, 0, 3),
                (2, 0, false, 2, 1),
                (3, 1, false, 2, 3),
                (5, 1, false, 2, 5),
                (6, 1, false, 3, 0),
                (4, 1, false, 3, 1),
                (9, 2, true, 4, 4),
                (8, 0, false, 5, 1),
            ],
        ),
        (
            19,
            &[
                (0, 0, false, 0, 3),
                (1, 2, false, 1, 1),
                (7, 0, false, 1, 4),
                (5, 1, false, 2, 0),
                (3, 0, false, 2, 2),
                (2, 1, false, 3, 4),
                (8, 2, false, 4, 0),
                (9, 3, false, 4, 2),
                (6, 0, false, 6, 2),
            ],
        ),
    ];

    fn orient(session: &mut Session, slot: usize, rotation: u8, flipped: bool) {
        for _ in 0..rotation {
            assert!(session.rotate_piece(slot));
        }
        if flipped {
            assert!(session.flip_piece(slot));
        }
    }

    fn place(session: &mut Session, slot: usize, row: usize, col: usize) -> PlacementOutcome {
        assert!(session.select_piece(slot), "slot {slot} could not be selected");
        session.attempt_placement(row, col)
    }

    fn small_pack(rows: usize, cols: usize, available: Vec<usize>) -> LevelPack {
        LevelPack {
            shapes: builtin_shapes(),
            levels: vec![LevelDef {
                rows,
                cols,
                locked_pieces: vec![LockedPiece {
                    shape: O,
                    anchor: Position::new(0, 0),
                    rotation: 0,
                }],
                available_shapes: available,
            }],
        }
    }

    #[test]
    fn test_load_seeds_only_locked_cells() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.current_level(), 0);
        assert_eq!(session.level_count(), 20);

        let grid = session.grid();
        let locked: Vec<_> = grid
            .iter()
            .filter(|(_, _, cell)| !cell.is_empty())
            .map(|(row, col, cell)| {
                assert!(cell.is_locked(), "({row}, {col}) is occupied but not locked");
                (row, col)
            })
            .collect();
        assert_eq!(locked, vec![(0, 0), (0, 1), (0, 2), (1, 0)]);
        assert!(session.tray().iter().all(|piece| !piece.placed));
        assert!(session
            .tray()
            .iter()
            .all(|piece| piece.orientation == Orientation::default()));
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_level_one_solution_wins() {
        let mut session = Session::new();
        for (step, &(slot, rotation, flipped, row, col)) in LEVEL_ONE_SOLUTION.iter().enumerate() {
            orient(&mut session, slot, rotation, flipped);
            let outcome = place(&mut session, slot, row, col);
            let expected = if step + 1 == LEVEL_ONE_SOLUTION.len() {
                PlacementOutcome::Won
            } else {
                PlacementOutcome::Placed
            };
            assert_eq!(outcome, expected, "step {step} placing slot {slot}");
        }

        assert!(session.grid().is_full());
        assert_eq!(session.state(), SessionState::Won);
        insta::assert_snapshot!(crate::grid::format_grid(session.grid()), @r"
        ###31
        #4331
        44311
        42555
        22255
        ");
    }

    #[test]
    fn test_seven_by_six_levels_are_winnable() {
        for &(level, moves) in SEVEN_BY_SIX_SOLUTIONS {
            let mut session = Session::new();
            assert!(session.load_level(level));
            for &(slot, rotation, flipped, row, col) in moves {
                orient(&mut session, slot, rotation, flipped);
                assert_ne!(
                    place(&mut session, slot, row, col),
                    PlacementOutcome::Rejected,
                    "level {} slot {slot} at ({row}, {col})",
                    level + 1
                );
            }
            assert_eq!(session.state(), SessionState::Won, "level {}", level + 1);
            // one piece stays in the tray
            let unused = session.tray().iter().filter(|piece| !piece.placed).count();
            assert_eq!(unused, 1);
        }
    }

    #[test]
    fn test_last_level_solution_board() {
        let mut session = Session::new();
        let (level, moves) = SEVEN_BY_SIX_SOLUTIONS[4];
        session.load_level(level);
        for &(slot, rotation, flipped, row, col) in moves {
            orient(&mut session, slot, rotation, flipped);
            place(&mut session, slot, row, col);
        }
        insta::assert_snapshot!(crate::grid::format_grid(session.grid()), @r"
        ###111
        #2#188
        624488
        622443
        69AA33
        99AAA3
        997777
        ");
    }

    #[test]
    fn test_actions_are_ignored_after_victory() {
        let mut session = Session::new();
        for &(slot, rotation, flipped, row, col) in LEVEL_ONE_SOLUTION {
            orient(&mut session, slot, rotation, flipped);
            place(&mut session, slot, row, col);
        }
        assert_eq!(session.state(), SessionState::Won);
        let grid = session.grid().clone();

        assert!(!session.remove_at(4, 4));
        assert!(!session.rotate_piece(0));
        assert!(!session.select_piece(0));
        assert_eq!(session.grid(), &grid);

        session.reset_current_level();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.grid().occupied_count(), 4);
    }

    #[test]
    fn test_out_of_bounds_placement_is_rejected() {
        let mut session = Session::new();
        // L2 is three rows tall; anchored on row 3 its bottom cell maps to row 5
        let before = session.grid().clone();
        assert_eq!(place(&mut session, 0, 3, 0), PlacementOutcome::Rejected);
        assert_eq!(session.grid(), &before);
        assert!(!session.tray()[0].placed);
        assert_eq!(session.selected(), Some(0));
    }

    #[test]
    fn test_far_out_of_range_placement_is_rejected() {
        let mut session = Session::new();
        let before = session.grid().clone();
        let outcome = place(&mut session, 3, 0, usize::MAX);
        assert_eq!(outcome, PlacementOutcome::Rejected);
        assert_eq!(
            session.attempt_placement(usize::MAX, 0),
            PlacementOutcome::Rejected
        );
        assert_eq!(
            session.click(usize::MAX, usize::MAX),
            PlacementOutcome::Rejected
        );
        assert_eq!(session.grid(), &before);
        assert_eq!(session.selected(), Some(3));
        assert!(!session.tray()[3].placed);
    }

    #[test]
    fn test_overlapping_placement_is_rejected() {
        let mut session = Session::new();
        // T at (2, 0) covers (2,0) (2,1) (2,2) (3,1)
        assert_eq!(place(&mut session, 1, 2, 0), PlacementOutcome::Placed);
        let after_first = session.grid().clone();

        // Z at (3, 1) covers (3,1) which the T already holds
        assert_eq!(place(&mut session, 2, 3, 1), PlacementOutcome::Rejected);
        assert_eq!(session.grid(), &after_first);
        assert!(!session.tray()[2].placed);
        assert!(session.tray()[1].placed);
    }

    #[test]
    fn test_placement_onto_locked_cell_is_rejected() {
        let mut session = Session::new();
        assert_eq!(place(&mut session, 4, 0, 0), PlacementOutcome::Rejected);
        assert!(session.grid().iter().all(|(_, _, cell)| cell.is_empty() || cell.is_locked()));
    }

    #[test]
    fn test_placement_without_selection_is_rejected() {
        let mut session = Session::new();
        assert_eq!(session.attempt_placement(2, 2), PlacementOutcome::Rejected);
        assert_eq!(session.grid().occupied_count(), 4);
    }

    #[test]
    fn test_remove_returns_piece_to_tray() {
        let mut session = Session::new();
        assert_eq!(place(&mut session, 1, 2, 0), PlacementOutcome::Placed);
        assert_eq!(session.grid().occupied_count(), 8);

        assert!(session.remove_at(3, 1));
        assert_eq!(session.grid().occupied_count(), 4);
        assert!(!session.tray()[1].placed);
        // the piece can go back somewhere else
        assert_eq!(place(&mut session, 1, 3, 2), PlacementOutcome::Placed);
    }

    #[test]
    fn test_remove_noops_leave_grid_unchanged() {
        let mut session = Session::new();
        assert_eq!(place(&mut session, 1, 2, 0), PlacementOutcome::Placed);
        let before = session.grid().clone();

        assert!(!session.remove_at(0, 0), "locked cell was removed");
        assert!(!session.remove_at(4, 4), "empty cell was removed");
        assert!(!session.remove_at(9, 9), "out-of-range cell was removed");

        session.select_piece(0);
        assert!(!session.remove_at(2, 0), "removed while a piece was selected");
        assert_eq!(session.grid(), &before);
    }

    #[test]
    fn test_click_routes_to_place_or_remove() {
        let mut session = Session::new();
        session.select_piece(1);
        assert_eq!(session.click(2, 0), PlacementOutcome::Placed);
        assert!(session.tray()[1].placed);

        assert_eq!(session.click(2, 1), PlacementOutcome::Rejected);
        assert!(!session.tray()[1].placed);
        assert_eq!(session.grid().occupied_count(), 4);
    }

    #[test]
    fn test_placed_pieces_cannot_be_selected_or_transformed() {
        let mut session = Session::new();
        assert_eq!(place(&mut session, 1, 2, 0), PlacementOutcome::Placed);
        assert!(!session.select_piece(1));
        assert!(!session.rotate_piece(1));
        assert!(!session.flip_piece(1));
        assert_eq!(session.tray()[1].orientation, Orientation::default());
        assert!(!session.select_piece(99));
    }

    #[test]
    fn test_rotate_and_flip_leave_grid_alone() {
        let mut session = Session::new();
        let before = session.grid().clone();
        for _ in 0..5 {
            session.rotate_piece(0);
        }
        session.flip_piece(0);
        assert_eq!(session.tray()[0].orientation, Orientation::new(1, true));
        assert_eq!(session.grid(), &before);
        assert_eq!(
            session.piece_pattern(0).unwrap().to_rows(),
            vec![vec![1, 1, 1], vec![0, 0, 1]]
        );
    }

    #[test]
    fn test_victory_ignores_unused_pieces() {
        // 2x4 with an O locked on the left: one more O fills it, the I4 is slack
        let mut session = Session::with_pack(small_pack(2, 4, vec![I4, O])).unwrap();
        assert_eq!(place(&mut session, 1, 0, 2), PlacementOutcome::Won);
        assert_eq!(session.state(), SessionState::Won);
        assert!(!session.tray()[0].placed);
    }

    #[test]
    fn test_victory_requires_every_cell() {
        let mut session = Session::with_pack(small_pack(2, 5, vec![O, I3])).unwrap();
        assert_eq!(place(&mut session, 0, 0, 2), PlacementOutcome::Placed);
        assert_eq!(session.state(), SessionState::Active);
        assert!(!session.grid().is_full());
    }

    #[test]
    fn test_hint_scans_row_major_for_first_unplaced_piece() {
        let mut session = Session::new();
        assert_eq!(
            session.request_hint(),
            Hint::Place {
                shape_name: "L2".to_owned(),
                row: 0,
                col: 3
            }
        );

        assert_eq!(place(&mut session, 0, 0, 3), PlacementOutcome::Placed);
        assert_eq!(
            session.request_hint(),
            Hint::Place {
                shape_name: "T".to_owned(),
                row: 1,
                col: 1
            }
        );

        // an L2 standing at (1, 1) leaves no three-wide gap for an upright T
        session.reset_current_level();
        assert_eq!(place(&mut session, 0, 1, 1), PlacementOutcome::Placed);
        assert_eq!(
            session.request_hint(),
            Hint::TryTransforming {
                shape_name: "T".to_owned()
            }
        );
    }

    #[test]
    fn test_hint_suggests_transforming() {
        // the I4 does not fit in a 2-column strip until it is rotated
        let pack = LevelPack {
            shapes: builtin_shapes(),
            levels: vec![LevelDef {
                rows: 4,
                cols: 2,
                locked_pieces: vec![],
                available_shapes: vec![I4, I4],
            }],
        };
        let mut session = Session::with_pack(pack).unwrap();
        assert_eq!(
            session.request_hint(),
            Hint::TryTransforming {
                shape_name: "I4".to_owned()
            }
        );

        session.rotate_piece(0);
        assert_eq!(
            session.request_hint(),
            Hint::Place {
                shape_name: "I4".to_owned(),
                row: 0,
                col: 0
            }
        );
    }

    #[test]
    fn test_hint_reports_all_placed() {
        let mut session = Session::with_pack(small_pack(2, 4, vec![O])).unwrap();
        place(&mut session, 0, 0, 2);
        assert_eq!(session.request_hint(), Hint::AllPlaced);
    }

    #[test]
    fn test_level_navigation() {
        let mut session = Session::new();
        assert!(!session.change_level(-1));
        assert_eq!(session.current_level(), 0);

        assert!(session.change_level(1));
        assert_eq!(session.current_level(), 1);
        assert_eq!(session.tray().len(), 5);
        assert_eq!(session.level(), &session.pack().levels[1]);
        assert_eq!(session.level().locked_pieces[0].shape, O);

        assert!(session.load_level(19));
        assert!(!session.change_level(1));
        assert!(!session.load_level(20));
        assert_eq!(session.current_level(), 19);
        assert_eq!(session.grid().rows(), 7);
    }

    #[test]
    fn test_reset_discards_progress() {
        let mut session = Session::new();
        session.rotate_piece(3);
        place(&mut session, 1, 2, 0);
        session.reset_current_level();

        assert_eq!(session.grid().occupied_count(), 4);
        assert!(session.tray().iter().all(|piece| !piece.placed));
        assert_eq!(session.tray()[3].orientation, Orientation::default());
    }

    #[test]
    fn test_invalid_pack_is_rejected() {
        let pack = small_pack(3, 3, vec![I3]);
        assert!(matches!(
            Session::with_pack(pack),
            Err(LevelError::Unfillable { .. })
        ));
    }

    #[test]
    fn test_duplicate_shapes_in_tray_are_tracked_separately() {
        let mut session = Session::with_pack(small_pack(2, 6, vec![O, O, L1])).unwrap();
        assert_eq!(place(&mut session, 0, 0, 2), PlacementOutcome::Placed);
        assert_eq!(place(&mut session, 1, 0, 4), PlacementOutcome::Won);

        session.reset_current_level();
        place(&mut session, 0, 0, 2);
        place(&mut session, 1, 0, 4);
        assert_eq!(session.state(), SessionState::Won);
    }
}
