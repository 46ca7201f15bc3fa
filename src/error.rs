//! Error types for the rules core.
//!
//! Only rule violations are errors. Unknown device codes and ambiguous
//! joysticks are not: the input layer ignores the former and reports the
//! latter through [`InputAggregator::multiple_joysticks`](crate::input::InputAggregator::multiple_joysticks).

use crate::board::Square;
use crate::core::{PieceId, PieceState};
use crate::rules::GamePhase;

/// Errors raised by board and rule operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuatterError {
    /// Placement onto a square that already holds a piece.
    #[error("square {square} is already occupied")]
    OccupiedCell { square: Square },

    /// Piece identifier outside `0..16`.
    #[error("invalid piece id {0} (expected 0..16)")]
    InvalidPieceId(u8),

    /// Board coordinate outside the 4x4 grid.
    #[error("invalid square ({row}, {col})")]
    InvalidSquare { row: u8, col: u8 },

    /// A pick was requested while no piece is selected.
    #[error("no piece is selected")]
    NoSelection,

    /// A put was requested while no piece has been picked.
    #[error("no piece has been picked")]
    NoPickedPiece,

    /// The action does not belong to the current phase.
    #[error("cannot {action} during {phase}")]
    WrongPhase {
        phase: GamePhase,
        action: &'static str,
    },

    /// The piece is not in a state that allows the operation.
    #[error("piece {piece} is {state:?}")]
    PieceUnavailable { piece: PieceId, state: PieceState },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuatterError>;
