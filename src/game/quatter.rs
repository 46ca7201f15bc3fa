//! Host-facing entry point.

use tracing::{debug, info};

use super::session::Game;
use crate::board::Table;
use crate::core::{InputConfig, PieceId, TableConfig, Vec2, Vec3};
use crate::host::Host;
use crate::input::{FrameReport, InputAggregator, JoystickId};
use crate::rules::{GamePhase, GameResult};

/// A game of Quatter plus the input aggregator driving it.
///
/// ## Usage
///
/// ```
/// use quatter::{CommandBuffer, Quatter, Vec3};
/// use quatter::input::codes::key;
///
/// let mut quatter = Quatter::default();
/// let mut host = CommandBuffer::new();
///
/// // Space selects the nearest piece, a second press hands it over.
/// let camera = Vec3::new(0.0, 5.0, -5.0);
/// quatter.on_key_down(key::SPACE);
/// quatter.update(0.016, camera, &mut host);
/// quatter.on_key_up(key::SPACE);
/// quatter.on_key_down(key::SPACE);
/// quatter.update(0.016, camera, &mut host);
///
/// assert_eq!(quatter.phase().to_string(), "Player 2 puts");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Quatter {
    game: Game,
    input: InputAggregator,
}

impl Quatter {
    #[must_use]
    pub fn new(input: InputConfig, table: TableConfig) -> Self {
        info!(seed = table.seed, "new game");
        Self {
            game: Game::new(table),
            input: InputAggregator::new(input),
        }
    }

    // === Device events ===

    pub fn on_key_down(&mut self, code: u32) {
        self.input.on_key_down(code);
    }

    pub fn on_key_up(&mut self, code: u32) {
        self.input.on_key_up(code);
    }

    pub fn on_mouse_button_down(&mut self, code: u32) {
        self.input.on_mouse_button_down(code);
    }

    pub fn on_mouse_button_up(&mut self, code: u32) {
        self.input.on_mouse_button_up(code);
    }

    pub fn on_mouse_move(&mut self, delta: Vec2) {
        self.input.on_mouse_move(delta);
    }

    pub fn on_mouse_wheel(&mut self, delta: f32) {
        self.input.on_mouse_wheel(delta);
    }

    pub fn on_joystick_button_down(&mut self, joystick: JoystickId, code: u32) {
        self.input.on_joystick_button_down(joystick, code);
    }

    pub fn on_joystick_button_up(&mut self, joystick: JoystickId, code: u32) {
        self.input.on_joystick_button_up(joystick, code);
    }

    pub fn on_axis_move(&mut self, joystick: JoystickId, axis: u32, value: f32) {
        self.input.on_axis_move(joystick, axis, value);
    }

    pub fn on_joystick_connected(&mut self, joystick: JoystickId) {
        self.input.on_joystick_connected(joystick);
    }

    pub fn on_joystick_disconnected(&mut self, joystick: JoystickId) {
        self.input.on_joystick_disconnected(joystick);
    }

    /// Run one frame. `camera` is the camera's world position.
    pub fn update(&mut self, elapsed: f32, camera: Vec3, host: &mut impl Host) -> FrameReport {
        self.input.update(elapsed, camera, &mut self.game, host)
    }

    // === Direct commands ===

    /// Select a piece by its attribute bits, e.g. after the player clicked it.
    ///
    /// An id outside 0..16 is a host bug: it trips a debug assertion and is
    /// otherwise ignored.
    pub fn select_piece(&mut self, raw: u8, host: &mut impl Host) {
        let id = match PieceId::new(raw) {
            Ok(id) => id,
            Err(err) => {
                debug_assert!(false, "{err}");
                return;
            }
        };
        if let Err(err) = self.game.select_piece(id, host) {
            debug!(%err, "select ignored");
        }
    }

    /// Start a new game.
    pub fn reset(&mut self, host: &mut impl Host) {
        self.game.reset(host);
        self.input.reset();
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.game.result()
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        self.game.table()
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn input(&self) -> &InputAggregator {
        &self.input
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.input.is_idle()
    }

    #[must_use]
    pub fn active_joystick(&self) -> Option<JoystickId> {
        self.input.active_joystick()
    }

    #[must_use]
    pub fn multiple_joysticks(&self) -> bool {
        self.input.multiple_joysticks()
    }
}
