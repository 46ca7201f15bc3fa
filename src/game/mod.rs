//! Game session and the host-facing facade.

pub mod quatter;
pub mod session;

pub use quatter::Quatter;
pub use session::Game;
