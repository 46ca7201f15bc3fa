//! One game of Quatter: the table, the turn machine and the selection.
//!
//! `Game` exposes the semantic operations the input layer needs (confirm,
//! step, follow the camera, reset) and turns their outcomes into host
//! feedback. It never looks at devices.

use tracing::debug;

use crate::board::{Square, Table};
use crate::core::{PieceId, TableConfig, Vec3};
use crate::error::{QuatterError, Result};
use crate::host::Host;
use crate::rules::{GamePhase, GameResult, GameStateMachine, Transition};
use crate::selection::{SelectionController, StepDirection};

/// Table, rules and selection of a single game.
#[derive(Clone, Debug, Default)]
pub struct Game {
    table: Table,
    rules: GameStateMachine,
    selection: SelectionController,
}

impl Game {
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        Self {
            table: Table::new(config),
            rules: GameStateMachine::new(),
            selection: SelectionController::new(),
        }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.rules.phase()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.result()
    }

    /// Select a specific piece for the current picker.
    pub fn select_piece(&mut self, id: PieceId, host: &mut impl Host) -> Result<bool> {
        let phase = self.rules.phase();
        if !phase.is_picking() {
            return Err(QuatterError::WrongPhase {
                phase,
                action: "select",
            });
        }
        self.selection.select(&mut self.table, id, host)
    }

    /// The action button: pick the selected piece, or put the picked one.
    ///
    /// Picking with nothing selected falls back to the piece nearest the
    /// camera and leaves the pick for the next confirm. Putting targets the
    /// highlighted square, or the empty square nearest the camera. Terminal
    /// phases ignore the action.
    ///
    /// Returns the transition if the phase moved on.
    pub fn confirm(&mut self, camera: Vec3, host: &mut impl Host) -> Result<Option<Transition>> {
        let phase = self.rules.phase();

        if phase.is_picking() {
            let transition = match self.rules.pick(&mut self.table) {
                Ok(transition) => transition,
                Err(QuatterError::NoSelection) => {
                    debug!("confirm without selection, selecting nearest piece");
                    self.selection.camera_select(&mut self.table, camera, host);
                    return Ok(None);
                }
                Err(err) => return Err(err),
            };
            if let Some(id) = self.table.picked() {
                host.request_pick_visual(id);
            }
            self.selection.release_picked();
            self.finish(transition, camera, host);
            return Ok(Some(transition));
        }

        if phase.is_putting() {
            let square = match self.selection.square() {
                Some(square) => square,
                None => match self.selection.camera_select_square(self.table.board(), camera, host) {
                    Some(square) => square,
                    None => return Ok(None),
                },
            };
            return self.put_at(square, camera, host).map(Some);
        }

        debug!(%phase, "confirm ignored");
        Ok(None)
    }

    /// Put the picked piece on a specific square.
    pub fn put_at(&mut self, square: Square, camera: Vec3, host: &mut impl Host) -> Result<Transition> {
        let piece = self.table.picked().ok_or(QuatterError::NoPickedPiece)?;
        let transition = self.rules.put(&mut self.table, square)?;
        host.request_place_visual(piece, square);
        self.selection.clear_square(host);
        self.finish(transition, camera, host);
        Ok(transition)
    }

    /// Step the selection: pieces while picking, squares while putting.
    pub fn step(&mut self, direction: StepDirection, camera: Vec3, host: &mut impl Host) {
        let phase = self.rules.phase();
        if phase.is_picking() {
            self.selection
                .step_select(&mut self.table, direction, camera, host);
        } else if phase.is_putting() {
            self.selection
                .step_square(self.table.board(), direction, camera, host);
        }
    }

    /// Proximity selection for the current frame. Does nothing in step mode.
    pub fn track_camera(&mut self, camera: Vec3, host: &mut impl Host) {
        if self.selection.mode() != crate::selection::SelectionMode::Camera {
            return;
        }
        let phase = self.rules.phase();
        if phase.is_picking() {
            self.selection.camera_select(&mut self.table, camera, host);
        } else if phase.is_putting() {
            self.selection
                .camera_select_square(self.table.board(), camera, host);
        }
    }

    /// The player moved the camera; selection follows it again.
    pub fn follow_camera(&mut self) {
        self.selection.set_camera_mode();
    }

    /// Start over: empty board, all pieces free, `Player1Picks`.
    pub fn reset(&mut self, host: &mut impl Host) {
        self.rules.reset(&mut self.table);
        self.selection.clear();
        host.notify_reset();
        host.notify_phase_changed(self.rules.phase());
    }

    fn finish(&mut self, transition: Transition, camera: Vec3, host: &mut impl Host) {
        if transition.changed() {
            host.notify_phase_changed(transition.to);
        }
        if let Some(line) = transition.winning_line() {
            host.notify_win(&line);
        }
        if transition.auto_select {
            self.selection.set_camera_mode();
            self.selection.camera_select(&mut self.table, camera, host);
        }
    }
}
