//! Pieces and their attributes.
//!
//! Every piece has four independent binary traits. The four bits form a
//! value in `0..16`, and that value *is* the piece identity: the set of 16
//! pieces is exactly the set of 16 bit patterns.
//!
//! ## Bit Layout
//!
//! | Bit | Set | Clear |
//! |-----|-----|-------|
//! | 0 | tall | short |
//! | 1 | dark | light |
//! | 2 | round | square |
//! | 3 | hollow | solid |

use serde::{Deserialize, Serialize};

use super::geometry::Vec3;
use crate::board::Square;
use crate::error::{QuatterError, Result};

/// Number of pieces (and of distinct attribute patterns).
pub const NUM_PIECES: usize = 16;

/// Mask covering the four attribute bits.
pub const ATTRIBUTE_MASK: u8 = 0b1111;

/// One of the four binary piece traits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Bit 0.
    Tall,
    /// Bit 1.
    Dark,
    /// Bit 2.
    Round,
    /// Bit 3.
    Hollow,
}

impl Attribute {
    /// All attributes in bit order.
    pub const ALL: [Attribute; 4] = [
        Attribute::Tall,
        Attribute::Dark,
        Attribute::Round,
        Attribute::Hollow,
    ];

    /// Bit position of this attribute.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Attribute::Tall => 0,
            Attribute::Dark => 1,
            Attribute::Round => 2,
            Attribute::Hollow => 3,
        }
    }

    /// Single-bit mask of this attribute.
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }
}

/// The 4-bit attribute value of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceAttributes(u8);

impl PieceAttributes {
    /// Create attributes from a bit pattern in `0..16`.
    pub fn new(bits: u8) -> Result<Self> {
        if bits > ATTRIBUTE_MASK {
            return Err(QuatterError::InvalidPieceId(bits));
        }
        Ok(Self(bits))
    }

    /// Build from the four flags in bit order.
    #[must_use]
    pub const fn from_flags(tall: bool, dark: bool, round: bool, hollow: bool) -> Self {
        Self((tall as u8) | (dark as u8) << 1 | (round as u8) << 2 | (hollow as u8) << 3)
    }

    /// Raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Value of the bit at `index` (0..4).
    #[must_use]
    pub const fn bit(self, index: u8) -> bool {
        self.0 >> index & 1 == 1
    }

    /// Whether the piece has the given trait.
    #[must_use]
    pub const fn has(self, attribute: Attribute) -> bool {
        self.0 & attribute.mask() != 0
    }

    /// The four flags in bit order.
    #[must_use]
    pub fn flags(self) -> [bool; 4] {
        Attribute::ALL.map(|a| self.has(a))
    }
}

/// Piece identifier, equal to the attribute bit pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(u8);

impl PieceId {
    /// Create a piece ID, rejecting values outside `0..16`.
    pub fn new(id: u8) -> Result<Self> {
        PieceAttributes::new(id).map(Self::from)
    }

    /// Raw index (0..16).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Attributes encoded by this identifier.
    #[must_use]
    pub const fn attributes(self) -> PieceAttributes {
        PieceAttributes(self.0)
    }

    /// Identifier `offset` positions away, wrapping modulo 16.
    #[must_use]
    pub const fn wrapping_offset(self, offset: i8) -> Self {
        Self((self.0 as i16 + offset as i16).rem_euclid(NUM_PIECES as i16) as u8)
    }

    /// Iterate over all 16 identifiers in order.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..NUM_PIECES as u8).map(PieceId)
    }
}

impl From<PieceAttributes> for PieceId {
    fn from(attributes: PieceAttributes) -> Self {
        Self(attributes.bits())
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({:04b})", self.0)
    }
}

/// Lifecycle state of a piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceState {
    /// Available to be selected and picked.
    #[default]
    Free,
    /// Highlighted as the current candidate.
    Selected,
    /// Chosen by one player, waiting to be put by the other.
    Picked,
    /// On the board.
    Placed,
}

/// A game piece.
///
/// Attributes never change. State, board square and position change as the
/// piece moves through its lifecycle; [`Piece::reset`] restores it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    state: PieceState,
    square: Option<Square>,
    home: Vec3,
    position: Vec3,
}

impl Piece {
    /// Create a free piece resting at `home`.
    #[must_use]
    pub fn new(attributes: PieceAttributes, home: Vec3) -> Self {
        Self {
            id: attributes.into(),
            state: PieceState::Free,
            square: None,
            home,
            position: home,
        }
    }

    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub fn attributes(&self) -> PieceAttributes {
        self.id.attributes()
    }

    #[must_use]
    pub fn state(&self) -> PieceState {
        self.state
    }

    /// Board square, set only while placed.
    #[must_use]
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    /// Resting position off the board.
    #[must_use]
    pub fn home(&self) -> Vec3 {
        self.home
    }

    /// Current world position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Free or selected pieces can still be chosen.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self.state, PieceState::Free | PieceState::Selected)
    }

    /// Mark as selected. Only free pieces can be selected.
    pub fn select(&mut self) -> Result<()> {
        self.transition(PieceState::Free, PieceState::Selected)
    }

    /// Demote a selected piece back to free.
    pub fn deselect(&mut self) -> Result<()> {
        self.transition(PieceState::Selected, PieceState::Free)
    }

    /// Hand a selected piece to the opponent.
    pub fn pick(&mut self) -> Result<()> {
        self.transition(PieceState::Selected, PieceState::Picked)
    }

    /// Record placement. Called by the board, which owns the grid invariant.
    pub(crate) fn place(&mut self, square: Square, position: Vec3) {
        self.state = PieceState::Placed;
        self.square = Some(square);
        self.position = position;
    }

    /// Return to the free state at the home position.
    pub fn reset(&mut self) {
        self.state = PieceState::Free;
        self.square = None;
        self.position = self.home;
    }

    fn transition(&mut self, from: PieceState, to: PieceState) -> Result<()> {
        if self.state != from {
            return Err(QuatterError::PieceUnavailable {
                piece: self.id,
                state: self.state,
            });
        }
        self.state = to;
        Ok(())
    }
}
