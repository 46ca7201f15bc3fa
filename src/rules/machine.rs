//! Turn state machine.
//!
//! The machine owns the phase. It never stores the table: callers lend it
//! for each operation, and the machine asks the board for a win after every
//! put.
//!
//! ## Transitions
//!
//! | Current | Event | Next |
//! |---|---|---|
//! | `Player1Picks` | picked | `Player2Puts` |
//! | `Player2Puts` | put, no win | `Player2Picks` (auto-select) |
//! | `Player2Picks` | picked | `Player1Puts` |
//! | `Player1Puts` | put, no win | `Player1Picks` (auto-select) |
//! | any `*Puts` | put, win | `Quatter(line)` |
//! | any `*Puts` | put fills the board | `Draw` |
//! | `Quatter` / `Draw` | anything | unchanged |

use tracing::{debug, info};

use super::phase::{GamePhase, GameResult};
use crate::board::{Square, Table, WinningLine};
use crate::core::Player;
use crate::error::{QuatterError, Result};

/// Outcome of one advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: GamePhase,
    pub to: GamePhase,
    /// The next picker should get the free piece nearest the camera.
    pub auto_select: bool,
}

impl Transition {
    /// Whether the phase actually changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// The winning line, if this transition ended the game with one.
    #[must_use]
    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.to {
            GamePhase::Quatter(line) if self.changed() => Some(line),
            _ => None,
        }
    }
}

/// Phase owner.
#[derive(Clone, Debug, Default)]
pub struct GameStateMachine {
    phase: GamePhase,
    winner: Option<Player>,
}

impl GameStateMachine {
    /// Start in `Player1Picks`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// `Some` once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            GamePhase::Quatter(line) => self
                .winner
                .map(|player| GameResult::Winner { player, line }),
            GamePhase::Draw => Some(GameResult::Draw),
            _ => None,
        }
    }

    /// Advance after a completed pick or put.
    ///
    /// `win` and `board_full` are only consulted in a put phase. Terminal
    /// phases absorb every advance.
    pub fn advance(&mut self, win: Option<WinningLine>, board_full: bool) -> Transition {
        let from = self.phase;
        let (to, auto_select) = if from.is_putting() {
            match win {
                Some(line) => (GamePhase::Quatter(line), false),
                None if board_full => (GamePhase::Draw, false),
                None => (from.next_in_cycle(), true),
            }
        } else {
            (from.next_in_cycle(), false)
        };

        if let GamePhase::Quatter(line) = to {
            if from != to {
                self.winner = from.player();
                info!(winner = ?self.winner, %line, "quatter");
            }
        }
        if from != to {
            info!(%from, %to, "phase changed");
        }

        self.phase = to;
        Transition {
            from,
            to,
            auto_select,
        }
    }

    /// Hand the selected piece to the opponent.
    pub fn pick(&mut self, table: &mut Table) -> Result<Transition> {
        if !self.phase.is_picking() {
            return Err(self.wrong_phase("pick"));
        }
        let id = table.selected().ok_or(QuatterError::NoSelection)?;
        table.piece_mut(id).pick()?;
        debug!(piece = %id, "piece picked");
        Ok(self.advance(None, false))
    }

    /// Put the picked piece on `square` and check for a win.
    ///
    /// On error the phase and the table are unchanged.
    pub fn put(&mut self, table: &mut Table, square: Square) -> Result<Transition> {
        if !self.phase.is_putting() {
            return Err(self.wrong_phase("put"));
        }
        let id = table.picked().ok_or(QuatterError::NoPickedPiece)?;
        table.place(id, square)?;

        let board = table.board();
        Ok(self.advance(board.check_win(), board.is_full()))
    }

    /// Back to `Player1Picks` with an empty board and all pieces free.
    pub fn reset(&mut self, table: &mut Table) {
        table.reset();
        self.phase = GamePhase::Player1Picks;
        self.winner = None;
        info!("game reset");
    }

    fn wrong_phase(&self, action: &'static str) -> QuatterError {
        QuatterError::WrongPhase {
            phase: self.phase,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PieceId, PieceState};

    fn select(table: &mut Table, raw: u8) -> PieceId {
        let id = PieceId::new(raw).unwrap();
        table.piece_mut(id).select().unwrap();
        id
    }

    #[test]
    fn test_advance_cycles_without_win() {
        let mut machine = GameStateMachine::new();
        let phases: Vec<_> = (0..4).map(|_| machine.advance(None, false).to).collect();
        assert_eq!(
            phases,
            vec![
                GamePhase::Player2Puts,
                GamePhase::Player2Picks,
                GamePhase::Player1Puts,
                GamePhase::Player1Picks,
            ]
        );
    }

    #[test]
    fn test_auto_select_only_after_puts() {
        let mut machine = GameStateMachine::new();
        let flags: Vec<_> = (0..4)
            .map(|_| machine.advance(None, false).auto_select)
            .collect();
        assert_eq!(flags, vec![false, true, false, true]);
    }

    #[test]
    fn test_win_ignored_in_pick_phase() {
        let mut machine = GameStateMachine::new();
        let mut board = crate::board::Board::new(1.0);
        for (i, square) in crate::board::LineKind::Row(0).squares().into_iter().enumerate() {
            let mut piece = crate::core::Piece::new(
                PieceId::new(i as u8).unwrap().attributes(),
                crate::core::Vec3::ZERO,
            );
            board.place(&mut piece, square).unwrap();
        }
        let line = board.check_win().unwrap();

        let t = machine.advance(Some(line), false);
        assert_eq!(t.to, GamePhase::Player2Puts);
        let t = machine.advance(Some(line), false);
        assert_eq!(t.to, GamePhase::Quatter(line));
        assert_eq!(t.winning_line(), Some(line));
        assert_eq!(
            machine.result(),
            Some(GameResult::Winner {
                player: Player::Two,
                line
            })
        );

        let t = machine.advance(None, false);
        assert!(!t.changed());
        assert_eq!(t.winning_line(), None);
    }

    #[test]
    fn test_draw_is_terminal() {
        let mut machine = GameStateMachine::new();
        machine.advance(None, false);
        let t = machine.advance(None, true);
        assert_eq!(t.to, GamePhase::Draw);
        assert_eq!(machine.result(), Some(GameResult::Draw));
        assert_eq!(machine.advance(None, false).to, GamePhase::Draw);
    }

    #[test]
    fn test_pick_requires_selection() {
        let mut table = Table::default();
        let mut machine = GameStateMachine::new();
        assert_eq!(machine.pick(&mut table), Err(QuatterError::NoSelection));
        assert_eq!(machine.phase(), GamePhase::Player1Picks);
    }

    #[test]
    fn test_pick_then_put() {
        let mut table = Table::default();
        let mut machine = GameStateMachine::new();
        let id = select(&mut table, 3);

        let t = machine.pick(&mut table).unwrap();
        assert_eq!(t.to, GamePhase::Player2Puts);
        assert_eq!(table.piece(id).state(), PieceState::Picked);

        let square = Square::new(1, 1).unwrap();
        let t = machine.put(&mut table, square).unwrap();
        assert_eq!(t.to, GamePhase::Player2Picks);
        assert!(t.auto_select);
        assert_eq!(table.board().piece_at(square), Some(id));
    }

    #[test]
    fn test_wrong_phase() {
        let mut table = Table::default();
        let mut machine = GameStateMachine::new();
        let square = Square::new(0, 0).unwrap();
        assert_eq!(
            machine.put(&mut table, square),
            Err(QuatterError::WrongPhase {
                phase: GamePhase::Player1Picks,
                action: "put",
            })
        );

        select(&mut table, 0);
        machine.pick(&mut table).unwrap();
        assert!(matches!(
            machine.pick(&mut table),
            Err(QuatterError::WrongPhase { action: "pick", .. })
        ));
    }

    #[test]
    fn test_put_on_occupied_square_keeps_phase() {
        let mut table = Table::default();
        let mut machine = GameStateMachine::new();
        let square = Square::new(0, 0).unwrap();

        select(&mut table, 0);
        machine.pick(&mut table).unwrap();
        machine.put(&mut table, square).unwrap();

        select(&mut table, 1);
        machine.pick(&mut table).unwrap();
        assert_eq!(
            machine.put(&mut table, square),
            Err(QuatterError::OccupiedCell { square })
        );
        assert_eq!(machine.phase(), GamePhase::Player1Puts);
        assert_eq!(table.picked(), PieceId::new(1).ok());
    }

    #[test]
    fn test_reset_from_terminal() {
        let mut table = Table::default();
        let mut machine = GameStateMachine::new();
        select(&mut table, 2);
        machine.pick(&mut table).unwrap();
        machine.put(&mut table, Square::new(3, 3).unwrap()).unwrap();
        machine.advance(None, true);
        machine.advance(None, true);
        assert!(machine.phase().is_terminal());

        machine.reset(&mut table);
        assert_eq!(machine.phase(), GamePhase::Player1Picks);
        assert_eq!(machine.result(), None);
        assert_eq!(table.free_count(), 16);
        assert_eq!(table.board().occupied_count(), 0);
    }
}
