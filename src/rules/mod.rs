//! Turn phases and the state machine that drives them.
//!
//! The machine defines:
//! - Which action (pick or put) is legal in each phase
//! - How a completed action moves the game on
//! - When the game ends (a winning line, or a full board)

pub mod machine;
pub mod phase;

pub use machine::{GameStateMachine, Transition};
pub use phase::{GamePhase, GameResult};
