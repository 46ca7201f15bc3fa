//! Board coordinates.

use serde::{Deserialize, Serialize};

use crate::core::Vec3;
use crate::error::{QuatterError, Result};

/// Board edge length in squares.
pub const BOARD_SIZE: usize = 4;

/// A square on the 4x4 board, addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Create a square, rejecting coordinates outside the board.
    pub fn new(row: u8, col: u8) -> Result<Self> {
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return Err(QuatterError::InvalidSquare { row, col });
        }
        Ok(Self { row, col })
    }

    /// Square from a row-major index in `0..16`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < BOARD_SIZE * BOARD_SIZE).then(|| Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        })
    }

    /// Const constructor for known-good coordinates.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row-major index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Centre of the square in world space for a board centred on the origin.
    #[must_use]
    pub fn world_position(self, square_size: f32) -> Vec3 {
        let offset = (BOARD_SIZE as f32 - 1.0) / 2.0;
        Vec3::new(
            (self.col as f32 - offset) * square_size,
            0.0,
            (self.row as f32 - offset) * square_size,
        )
    }

    /// All 16 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(Square::from_index)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
