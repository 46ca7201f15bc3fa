//! Core types: pieces, players, geometry, RNG, configuration.
//!
//! Everything here is a leaf; the board, rules, selection and input layers
//! build on these types.

pub mod config;
pub mod geometry;
pub mod piece;
pub mod player;
pub mod rng;

pub use config::{InputConfig, TableConfig, DEADZONE, IDLE_THRESHOLD, STEP_INTERVAL, VOLUME_STEP};
pub use geometry::{Vec2, Vec3};
pub use piece::{Attribute, Piece, PieceAttributes, PieceId, PieceState, ATTRIBUTE_MASK, NUM_PIECES};
pub use player::Player;
pub use rng::GameRng;
