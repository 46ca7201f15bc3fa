//! The ten winning lines and shared-attribute detection.
//!
//! A full line wins when its four pieces agree on at least one attribute
//! bit. Each bit is checked on its own: the pieces may differ everywhere
//! else.

use serde::{Deserialize, Serialize};

use super::square::{Square, BOARD_SIZE};
use crate::core::{Attribute, PieceId, ATTRIBUTE_MASK};

/// One of the ten lines of four squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Horizontal line at the given row.
    Row(u8),
    /// Vertical line at the given column.
    Column(u8),
    /// (0,0) to (3,3).
    Diagonal,
    /// (0,3) to (3,0).
    AntiDiagonal,
}

/// All lines in scan order: rows, columns, then the two diagonals.
pub const LINES: [LineKind; 10] = [
    LineKind::Row(0),
    LineKind::Row(1),
    LineKind::Row(2),
    LineKind::Row(3),
    LineKind::Column(0),
    LineKind::Column(1),
    LineKind::Column(2),
    LineKind::Column(3),
    LineKind::Diagonal,
    LineKind::AntiDiagonal,
];

impl LineKind {
    /// The four squares of this line.
    #[must_use]
    pub fn squares(self) -> [Square; BOARD_SIZE] {
        let last = BOARD_SIZE as u8 - 1;
        std::array::from_fn(|i| {
            let i = i as u8;
            match self {
                LineKind::Row(row) => Square::at(row, i),
                LineKind::Column(col) => Square::at(i, col),
                LineKind::Diagonal => Square::at(i, i),
                LineKind::AntiDiagonal => Square::at(i, last - i),
            }
        })
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Row(row) => write!(f, "row {row}"),
            LineKind::Column(col) => write!(f, "column {col}"),
            LineKind::Diagonal => write!(f, "diagonal"),
            LineKind::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// Attribute bits on which a group of pieces agrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SharedAttributes {
    /// Bits on which all pieces agree.
    mask: u8,
    /// Agreed value of each bit in `mask`.
    values: u8,
}

impl SharedAttributes {
    /// Compute the shared bits of a group of pieces.
    ///
    /// A bit is shared when it is set on every piece or clear on every piece.
    #[must_use]
    pub fn of(pieces: &[PieceId]) -> Self {
        let (all_set, all_clear) = pieces.iter().fold(
            (ATTRIBUTE_MASK, ATTRIBUTE_MASK),
            |(set, clear), piece| {
                let bits = piece.attributes().bits();
                (set & bits, clear & !bits & ATTRIBUTE_MASK)
            },
        );
        Self {
            mask: all_set | all_clear,
            values: all_set,
        }
    }

    /// No attribute is shared.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.mask == 0
    }

    /// Bit mask of the shared attributes.
    #[must_use]
    pub fn mask(self) -> u8 {
        self.mask
    }

    /// Shared attributes with the value all pieces have for them.
    pub fn iter(self) -> impl Iterator<Item = (Attribute, bool)> {
        Attribute::ALL
            .into_iter()
            .filter(move |a| self.mask & a.mask() != 0)
            .map(move |a| (a, self.values & a.mask() != 0))
    }
}

/// A completed line whose pieces share at least one attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    pub kind: LineKind,
    pub squares: [Square; BOARD_SIZE],
    pub pieces: [PieceId; BOARD_SIZE],
    pub shared: SharedAttributes,
}

impl std::fmt::Display for WinningLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}
