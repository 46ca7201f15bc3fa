//! # quatter
//!
//! Rules engine and input interpretation for Quatter, a two-player game of
//! sixteen pieces on a 4x4 board.
//!
//! ## The Game
//!
//! Every piece is a unique combination of four attributes: tall or short,
//! dark or light, round or square, hollow or solid. Players take turns in
//! two steps: one picks a piece for the opponent, the opponent puts it on
//! the board. Whoever completes a row, column or diagonal of four pieces
//! sharing at least one attribute wins.
//!
//! ## Design Principles
//!
//! 1. **Render-agnostic**: the crate never draws or plays sound. Visual and
//!    audio feedback goes through the [`Host`] trait.
//!
//! 2. **No globals**: [`Table`] owns all piece and board state and is lent to
//!    the rules and selection layers per call.
//!
//! 3. **Frame-driven input**: the host forwards device events and calls
//!    [`Quatter::update`] once per frame; all timing happens there.
//!
//! ## Modules
//!
//! - `core`: pieces, attributes, players, geometry, RNG, configuration
//! - `board`: squares, the ten winning lines, the grid and the table
//! - `rules`: phases and the turn state machine
//! - `selection`: proximity and step selection of pieces and squares
//! - `input`: bindings, joysticks, camera smoothing and the aggregator
//! - `host`: the core-to-host interface
//! - `game`: a game session and the [`Quatter`] facade

pub mod board;
pub mod core;
pub mod error;
pub mod game;
pub mod host;
pub mod input;
pub mod rules;
pub mod selection;

// Re-export commonly used types
pub use crate::core::{
    Attribute, GameRng, InputConfig, Piece, PieceAttributes, PieceId, PieceState,
    Player, TableConfig, Vec2, Vec3, NUM_PIECES,
};

pub use crate::board::{Board, LineKind, SharedAttributes, Square, Table, WinningLine, BOARD_SIZE};

pub use crate::rules::{GamePhase, GameResult, GameStateMachine, Transition};

pub use crate::selection::{SelectionController, SelectionMode, StepDirection};

pub use crate::input::{
    Action, AxisRole, Bindings, CameraIntent, FrameReport, InputAggregator, InputSource,
    JoystickId,
};

pub use crate::host::{CommandBuffer, Host, HostCommand};

pub use crate::game::{Game, Quatter};

pub use crate::error::{QuatterError, Result};
