//! Calls from the core to the rendering/audio host.
//!
//! The host implements [`Host`] and passes it to every operation that may
//! produce visual or audio feedback. All methods default to no-ops, so a
//! host only implements what it renders.
//!
//! Hosts that prefer to poll can use [`CommandBuffer`], which records each
//! call as a [`HostCommand`].

use serde::{Deserialize, Serialize};

use crate::board::{Square, WinningLine};
use crate::core::{PieceId, Vec2};
use crate::rules::GamePhase;

/// Rendering and audio collaborator.
#[allow(unused_variables)]
pub trait Host {
    /// Rotate (yaw, pitch) and zoom the camera by the given deltas.
    fn request_camera_move(&mut self, rotation: Vec2, zoom: f32) {}

    /// Highlight a piece as the current candidate.
    fn request_select_visual(&mut self, piece: PieceId) {}

    /// Remove the highlight from a piece.
    fn request_deselect_visual(&mut self, piece: PieceId) {}

    /// Show a piece as handed to the opponent.
    fn request_pick_visual(&mut self, piece: PieceId) {}

    /// Move a piece onto a board square.
    fn request_place_visual(&mut self, piece: PieceId, square: Square) {}

    /// Highlight the target square for the next put (`None` clears it).
    fn request_highlight_square(&mut self, square: Option<Square>) {}

    fn request_screenshot(&mut self) {}

    /// Switch music on or off.
    fn request_music_toggle(&mut self) {}

    /// Change music gain by `delta`.
    fn request_music_gain(&mut self, delta: f32) {}

    fn request_exit(&mut self) {}

    fn notify_phase_changed(&mut self, phase: GamePhase) {}

    fn notify_win(&mut self, line: &WinningLine) {}

    /// The table was cleared; every piece is back at rest.
    fn notify_reset(&mut self) {}
}

/// A recorded host call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HostCommand {
    CameraMove { rotation: Vec2, zoom: f32 },
    SelectVisual(PieceId),
    DeselectVisual(PieceId),
    PickVisual(PieceId),
    PlaceVisual { piece: PieceId, square: Square },
    HighlightSquare(Option<Square>),
    Screenshot,
    MusicToggle,
    MusicGain(f32),
    Exit,
    PhaseChanged(GamePhase),
    Win(WinningLine),
    Reset,
}

/// Host that queues every call for later processing.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<HostCommand>,
}

impl CommandBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Take all recorded commands, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Host for CommandBuffer {
    fn request_camera_move(&mut self, rotation: Vec2, zoom: f32) {
        self.commands.push(HostCommand::CameraMove { rotation, zoom });
    }

    fn request_select_visual(&mut self, piece: PieceId) {
        self.commands.push(HostCommand::SelectVisual(piece));
    }

    fn request_deselect_visual(&mut self, piece: PieceId) {
        self.commands.push(HostCommand::DeselectVisual(piece));
    }

    fn request_pick_visual(&mut self, piece: PieceId) {
        self.commands.push(HostCommand::PickVisual(piece));
    }

    fn request_place_visual(&mut self, piece: PieceId, square: Square) {
        self.commands.push(HostCommand::PlaceVisual { piece, square });
    }

    fn request_highlight_square(&mut self, square: Option<Square>) {
        self.commands.push(HostCommand::HighlightSquare(square));
    }

    fn request_screenshot(&mut self) {
        self.commands.push(HostCommand::Screenshot);
    }

    fn request_music_toggle(&mut self) {
        self.commands.push(HostCommand::MusicToggle);
    }

    fn request_music_gain(&mut self, delta: f32) {
        self.commands.push(HostCommand::MusicGain(delta));
    }

    fn request_exit(&mut self) {
        self.commands.push(HostCommand::Exit);
    }

    fn notify_phase_changed(&mut self, phase: GamePhase) {
        self.commands.push(HostCommand::PhaseChanged(phase));
    }

    fn notify_win(&mut self, line: &WinningLine) {
        self.commands.push(HostCommand::Win(*line));
    }

    fn notify_reset(&mut self) {
        self.commands.push(HostCommand::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;
    impl Host for Silent {}

    #[test]
    fn test_default_methods_are_noops() {
        let mut host = Silent;
        host.request_screenshot();
        host.notify_phase_changed(GamePhase::Draw);
    }

    #[test]
    fn test_buffer_records_in_order() {
        let mut buffer = CommandBuffer::new();
        let piece = PieceId::new(2).unwrap();
        buffer.request_select_visual(piece);
        buffer.request_screenshot();
        buffer.notify_phase_changed(GamePhase::Player2Puts);

        assert_eq!(
            buffer.commands(),
            &[
                HostCommand::SelectVisual(piece),
                HostCommand::Screenshot,
                HostCommand::PhaseChanged(GamePhase::Player2Puts),
            ]
        );

        let drained = buffer.drain();
        assert_eq!(drained.len(), 3);
        assert!(buffer.commands().is_empty());
    }
}
