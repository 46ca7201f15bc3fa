//! The 4x4 board: occupancy and win detection.

use serde::{Deserialize, Serialize};

use super::line::{SharedAttributes, WinningLine, LINES};
use super::square::{Square, BOARD_SIZE};
use crate::core::{Piece, PieceId, PieceState};
use crate::error::{QuatterError, Result};

/// Board occupancy.
///
/// ## Invariant
///
/// A square references a piece iff that piece is `Placed` on that square.
/// [`Board::place`] updates both sides together, so the grid and the piece
/// never disagree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<PieceId>; BOARD_SIZE]; BOARD_SIZE],
    square_size: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Board {
    /// Create an empty board with the given square size (world units).
    #[must_use]
    pub fn new(square_size: f32) -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            square_size,
        }
    }

    /// Piece on a square, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.cells[square.row() as usize][square.col() as usize]
    }

    #[must_use]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Empty squares in row-major order.
    pub fn empty_squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(|s| self.is_empty_at(*s))
    }

    /// Number of placed pieces.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupied_count() == BOARD_SIZE * BOARD_SIZE
    }

    /// World-space centre of a square.
    #[must_use]
    pub fn square_position(&self, square: Square) -> crate::core::Vec3 {
        square.world_position(self.square_size)
    }

    /// Put a piece on a square.
    ///
    /// Fails with `OccupiedCell` if the square is taken; the occupant is
    /// never replaced. A piece that is already on the board cannot be placed
    /// again.
    pub fn place(&mut self, piece: &mut Piece, square: Square) -> Result<()> {
        if !self.is_empty_at(square) {
            return Err(QuatterError::OccupiedCell { square });
        }
        if piece.state() == PieceState::Placed {
            return Err(QuatterError::PieceUnavailable {
                piece: piece.id(),
                state: piece.state(),
            });
        }

        self.cells[square.row() as usize][square.col() as usize] = Some(piece.id());
        piece.place(square, self.square_position(square));
        Ok(())
    }

    /// Scan the ten lines and return the first winning one.
    ///
    /// Scan order is rows 0..3, columns 0..3, diagonal, anti-diagonal.
    #[must_use]
    pub fn check_win(&self) -> Option<WinningLine> {
        LINES.iter().find_map(|&kind| {
            let squares = kind.squares();
            let [a, b, c, d] = squares.map(|s| self.piece_at(s));
            let pieces = [a?, b?, c?, d?];

            let shared = SharedAttributes::of(&pieces);
            (!shared.is_empty()).then_some(WinningLine {
                kind,
                squares,
                pieces,
                shared,
            })
        })
    }

    /// Remove every piece from the grid.
    ///
    /// Piece states are reset separately by the owner of the pieces.
    pub fn reset(&mut self) {
        self.cells = [[None; BOARD_SIZE]; BOARD_SIZE];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::LineKind;
    use crate::core::{PieceAttributes, Vec3};

    fn piece(bits: u8) -> Piece {
        Piece::new(PieceAttributes::new(bits).unwrap(), Vec3::ZERO)
    }

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn fill(board: &mut Board, placements: &[(u8, u8, u8)]) {
        for &(bits, row, col) in placements {
            board.place(&mut piece(bits), sq(row, col)).unwrap();
        }
    }

    #[test]
    fn test_place_sets_piece_state() {
        let mut board = Board::new(1.0);
        let mut p = piece(3);
        board.place(&mut p, sq(1, 2)).unwrap();

        assert_eq!(p.state(), PieceState::Placed);
        assert_eq!(p.square(), Some(sq(1, 2)));
        assert_eq!(p.position(), sq(1, 2).world_position(1.0));
        assert_eq!(board.piece_at(sq(1, 2)), Some(p.id()));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_place_on_occupied_square() {
        let mut board = Board::new(1.0);
        board.place(&mut piece(1), sq(0, 0)).unwrap();

        let mut other = piece(2);
        assert_eq!(
            board.place(&mut other, sq(0, 0)),
            Err(QuatterError::OccupiedCell { square: sq(0, 0) })
        );
        assert_eq!(other.state(), PieceState::Free);
        assert_eq!(board.piece_at(sq(0, 0)).map(|p| p.index()), Some(1));
    }

    #[test]
    fn test_place_twice_rejected() {
        let mut board = Board::new(1.0);
        let mut p = piece(5);
        board.place(&mut p, sq(0, 0)).unwrap();
        assert!(matches!(
            board.place(&mut p, sq(1, 1)),
            Err(QuatterError::PieceUnavailable { .. })
        ));
        assert!(board.is_empty_at(sq(1, 1)));
    }

    #[test]
    fn test_empty_board_has_no_win() {
        assert_eq!(Board::new(1.0).check_win(), None);
    }

    #[test]
    fn test_partial_line_has_no_win() {
        let mut board = Board::new(1.0);
        fill(&mut board, &[(0b0010, 0, 0), (0b0011, 0, 1), (0b0110, 0, 2)]);
        assert_eq!(board.check_win(), None);
    }

    #[test]
    fn test_row_of_dark_pieces_wins() {
        let mut board = Board::new(1.0);
        fill(
            &mut board,
            &[(0b0010, 0, 0), (0b0111, 0, 1), (0b1010, 0, 2), (0b1111, 0, 3)],
        );

        let line = board.check_win().expect("row 0 should win");
        assert_eq!(line.kind, LineKind::Row(0));
        assert_eq!(line.to_string(), "row 0");
        assert_eq!(line.shared.mask(), 0b0010);
    }

    #[test]
    fn test_row_without_shared_bit() {
        let mut board = Board::new(1.0);
        // Same row but the last piece is light and nothing else is common.
        fill(
            &mut board,
            &[(0b0010, 0, 0), (0b0111, 0, 1), (0b1010, 0, 2), (0b1101, 0, 3)],
        );
        assert_eq!(board.check_win(), None);
    }

    #[test]
    fn test_column_and_diagonals() {
        let mut board = Board::new(1.0);
        fill(
            &mut board,
            &[(0b0001, 0, 2), (0b0011, 1, 2), (0b0101, 2, 2), (0b1001, 3, 2)],
        );
        assert_eq!(board.check_win().map(|l| l.kind), Some(LineKind::Column(2)));

        let mut board = Board::new(1.0);
        fill(
            &mut board,
            &[(0b0000, 0, 3), (0b0001, 1, 2), (0b0010, 2, 1), (0b0100, 3, 0)],
        );
        assert_eq!(board.check_win().map(|l| l.kind), Some(LineKind::AntiDiagonal));

        let mut board = Board::new(1.0);
        fill(
            &mut board,
            &[(0b1000, 0, 0), (0b1001, 1, 1), (0b1110, 2, 2), (0b1111, 3, 3)],
        );
        assert_eq!(board.check_win().map(|l| l.kind), Some(LineKind::Diagonal));
    }

    #[test]
    fn test_rows_scanned_before_columns() {
        let mut board = Board::new(1.0);
        // Row 0 and column 0 both complete and both sharing bit 0.
        fill(
            &mut board,
            &[
                (0b0001, 0, 0),
                (0b0011, 0, 1),
                (0b0101, 0, 2),
                (0b0111, 0, 3),
                (0b1001, 1, 0),
                (0b1011, 2, 0),
                (0b1101, 3, 0),
            ],
        );
        assert_eq!(board.check_win().map(|l| l.kind), Some(LineKind::Row(0)));
    }

    #[test]
    fn test_reset_and_full() {
        let mut board = Board::new(1.0);
        for (i, square) in Square::all().enumerate() {
            board.place(&mut piece(i as u8), square).unwrap();
        }
        assert!(board.is_full());
        assert_eq!(board.empty_squares().count(), 0);

        board.reset();
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.empty_squares().count(), 16);
    }
}
