//! Board occupancy, winning lines and the table of pieces.

pub mod grid;
pub mod line;
pub mod square;
pub mod table;

pub use grid::Board;
pub use line::{LineKind, SharedAttributes, WinningLine, LINES};
pub use square::{Square, BOARD_SIZE};
pub use table::Table;
