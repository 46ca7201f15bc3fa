//! Piece and square selection.
//!
//! ## Strategies
//!
//! - **Proximity**: the available piece (free or selected) nearest the
//!   camera becomes the selection. Runs every frame while the player is
//!   active and not stepping manually.
//! - **Step**: cycle through free pieces by identifier, forwards or
//!   backwards, wrapping at 16. Placed and picked pieces are skipped.
//!
//! The same two strategies choose the target square while a piece is being
//! put, over empty squares in row-major order.
//!
//! At most one piece is ever `Selected`: selecting a new piece deselects the
//! previous one first, and reselecting the current piece does nothing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Square, Table, BOARD_SIZE};
use crate::core::{PieceId, PieceState, Vec3, NUM_PIECES};
use crate::error::{QuatterError, Result};
use crate::host::Host;

/// How the selection is currently driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Follows the camera.
    #[default]
    Camera,
    /// Driven by discrete step input; the camera no longer steals focus.
    Step,
}

/// Direction of a step. `Next` orders first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StepDirection {
    Next,
    Previous,
}

impl StepDirection {
    const fn sign(self) -> i8 {
        match self {
            StepDirection::Next => 1,
            StepDirection::Previous => -1,
        }
    }
}

/// Tracks the selected piece, the last selected piece and the target square.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    selected: Option<PieceId>,
    last_selected: Option<PieceId>,
    square: Option<Square>,
    mode: SelectionMode,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Piece that was selected before the current one (or before nothing).
    #[must_use]
    pub fn last_selected(&self) -> Option<PieceId> {
        self.last_selected
    }

    /// Target square for the next put.
    #[must_use]
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Hand control back to the camera.
    pub fn set_camera_mode(&mut self) {
        if self.mode != SelectionMode::Camera {
            debug!("selection follows camera");
        }
        self.mode = SelectionMode::Camera;
    }

    /// Select a free piece, deselecting the previous selection first.
    ///
    /// Returns `Ok(false)` if the piece was already selected.
    pub fn select(&mut self, table: &mut Table, id: PieceId, host: &mut impl Host) -> Result<bool> {
        if self.selected == Some(id) {
            return Ok(false);
        }
        let state = table.piece(id).state();
        if state != PieceState::Free {
            return Err(QuatterError::PieceUnavailable { piece: id, state });
        }

        self.deselect(table, host);
        table.piece_mut(id).select()?;
        self.selected = Some(id);
        host.request_select_visual(id);
        debug!(piece = %id, mode = ?self.mode, "piece selected");
        Ok(true)
    }

    /// Demote the current selection to free and remember it.
    pub fn deselect(&mut self, table: &mut Table, host: &mut impl Host) {
        let Some(id) = self.selected.take() else {
            return;
        };
        self.last_selected = Some(id);
        if table.piece_mut(id).deselect().is_ok() {
            host.request_deselect_visual(id);
        }
    }

    /// The selected piece was picked; it is no longer a selection candidate.
    pub fn release_picked(&mut self) {
        self.selected = None;
        self.last_selected = None;
    }

    /// Select the available piece nearest `camera`.
    ///
    /// Returns the selection afterwards.
    pub fn camera_select(
        &mut self,
        table: &mut Table,
        camera: Vec3,
        host: &mut impl Host,
    ) -> Option<PieceId> {
        let nearest = table
            .pieces()
            .iter()
            .filter(|p| p.is_available())
            .map(|p| (p.id(), p.position().distance(camera)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);

        if let Some(id) = nearest {
            if self.select(table, id, host).is_err() {
                debug!(piece = %id, "nearest piece not selectable");
            }
        }
        self.selected
    }

    /// Reselect the last selected piece if it is still free.
    pub fn select_last(&mut self, table: &mut Table, host: &mut impl Host) -> bool {
        match self.last_selected {
            Some(id) if table.piece(id).state() == PieceState::Free => {
                self.select(table, id, host).unwrap_or(false)
            }
            _ => false,
        }
    }

    /// Move the selection to the next free piece in `direction`.
    ///
    /// With nothing selected, the last selection is restored, or failing that
    /// the piece nearest the camera is taken. With no free piece left the
    /// selection is unchanged.
    pub fn step_select(
        &mut self,
        table: &mut Table,
        direction: StepDirection,
        camera: Vec3,
        host: &mut impl Host,
    ) -> Option<PieceId> {
        self.mode = SelectionMode::Step;

        let Some(current) = self.selected else {
            if !self.select_last(table, host) {
                self.camera_select(table, camera, host);
            }
            return self.selected;
        };

        let next = (1..NUM_PIECES as i8)
            .map(|k| current.wrapping_offset(k * direction.sign()))
            .find(|id| table.piece(*id).state() == PieceState::Free);

        if let Some(id) = next {
            if let Err(err) = self.select(table, id, host) {
                debug!(piece = %id, %err, "step target not selectable");
            }
        }
        self.selected
    }

    /// Target the empty square nearest `camera`.
    pub fn camera_select_square(
        &mut self,
        board: &Board,
        camera: Vec3,
        host: &mut impl Host,
    ) -> Option<Square> {
        let nearest = board
            .empty_squares()
            .map(|s| (s, board.square_position(s).distance(camera)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s);

        self.set_square(nearest, host);
        self.square
    }

    /// Move the target square to the next empty square in `direction`.
    pub fn step_square(
        &mut self,
        board: &Board,
        direction: StepDirection,
        camera: Vec3,
        host: &mut impl Host,
    ) -> Option<Square> {
        self.mode = SelectionMode::Step;

        let Some(current) = self.square else {
            return self.camera_select_square(board, camera, host);
        };

        let cells = (BOARD_SIZE * BOARD_SIZE) as isize;
        let next = (1..cells)
            .map(|k| (current.index() as isize + k * isize::from(direction.sign())).rem_euclid(cells))
            .filter_map(|i| Square::from_index(i as usize))
            .find(|s| board.is_empty_at(*s));

        if next.is_some() {
            self.set_square(next, host);
        }
        self.square
    }

    /// Forget the target square.
    pub fn clear_square(&mut self, host: &mut impl Host) {
        self.set_square(None, host);
    }

    /// Forget everything without notifying the host (the table was reset).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_square(&mut self, square: Option<Square>, host: &mut impl Host) {
        if self.square != square {
            self.square = square;
            host.request_highlight_square(square);
            debug!(square = ?square, "target square");
        }
    }
}
