//! The table: all 16 pieces plus the board.
//!
//! `Table` is the single owner of piece state. The rules and selection
//! layers receive it as `&mut Table` for the duration of a call rather than
//! holding on to it.

use tracing::debug;

use super::grid::Board;
use super::square::{Square, BOARD_SIZE};
use crate::core::{
    Attribute, GameRng, Piece, PieceAttributes, PieceId, PieceState, TableConfig, Vec3,
};
use crate::error::Result;

/// Pieces and board.
#[derive(Clone, Debug)]
pub struct Table {
    pieces: Vec<Piece>,
    board: Board,
    config: TableConfig,
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl Table {
    /// Create the 16 pieces at their resting positions and an empty board.
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        let mut rng = GameRng::new(config.seed).for_context("layout");
        let pieces = PieceId::all()
            .map(|id| {
                let home = home_position(id.attributes(), &config)
                    + Vec3::new(
                        rng.gen_symmetric(config.jitter),
                        0.0,
                        rng.gen_symmetric(config.jitter),
                    );
                Piece::new(id.attributes(), home)
            })
            .collect();

        Self {
            pieces,
            board: Board::new(config.square_size),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All pieces, indexed by `PieceId::index`.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[must_use]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// Pieces currently in `state`.
    pub fn pieces_in(&self, state: PieceState) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.state() == state)
    }

    /// The selected piece, if any.
    #[must_use]
    pub fn selected(&self) -> Option<PieceId> {
        self.pieces_in(PieceState::Selected).next().map(Piece::id)
    }

    /// The picked piece waiting to be put, if any.
    #[must_use]
    pub fn picked(&self) -> Option<PieceId> {
        self.pieces_in(PieceState::Picked).next().map(Piece::id)
    }

    #[must_use]
    pub fn free_count(&self) -> usize {
        self.pieces_in(PieceState::Free).count()
    }

    /// Place a piece on the board, keeping grid and piece in sync.
    pub fn place(&mut self, id: PieceId, square: Square) -> Result<()> {
        self.board.place(&mut self.pieces[id.index()], square)?;
        debug!(piece = %id, %square, "piece placed");
        Ok(())
    }

    /// Clear the board and return every piece to its resting position.
    pub fn reset(&mut self) {
        self.board.reset();
        for piece in &mut self.pieces {
            piece.reset();
        }
    }
}

/// Resting position of a piece before jitter.
///
/// Solid pieces rest left of the board and hollow pieces right of it. Within
/// each side the round bit picks the column (round pieces nearer the board)
/// and the tall/dark bits pick one of four rows.
fn home_position(attributes: PieceAttributes, config: &TableConfig) -> Vec3 {
    let bits = attributes.bits();
    let side = if attributes.has(Attribute::Hollow) { 1.0 } else { -1.0 };
    let column = if attributes.has(Attribute::Round) { 0.0 } else { 1.0 };
    let row = f32::from(bits & 0b11);

    let board_half = BOARD_SIZE as f32 * config.square_size / 2.0;
    let x = board_half + config.margin + (column + 0.5) * config.piece_spacing;
    let z = (row - 1.5) * config.piece_spacing;
    Vec3::new(side * x, 0.0, z)
}
