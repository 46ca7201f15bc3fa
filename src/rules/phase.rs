//! Game phases and results.

use serde::{Deserialize, Serialize};

use crate::board::WinningLine;
use crate::core::Player;

/// Turn phase.
///
/// Play cycles `Player1Picks → Player2Puts → Player2Picks → Player1Puts`.
/// A put that completes a winning line ends the game in `Quatter`; a put
/// that fills the board without a win ends it in `Draw`. Both are absorbing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Player1Picks,
    Player2Puts,
    Player2Picks,
    Player1Puts,
    /// Someone completed a line; records which.
    Quatter(WinningLine),
    /// Board full, no line.
    Draw,
}

impl GamePhase {
    /// Game over.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Quatter(_) | GamePhase::Draw)
    }

    /// A player is choosing a piece for the opponent.
    #[must_use]
    pub fn is_picking(self) -> bool {
        matches!(self, GamePhase::Player1Picks | GamePhase::Player2Picks)
    }

    /// A player is putting the piece they were handed.
    #[must_use]
    pub fn is_putting(self) -> bool {
        matches!(self, GamePhase::Player1Puts | GamePhase::Player2Puts)
    }

    /// The player expected to act, or `None` once the game is over.
    #[must_use]
    pub fn player(self) -> Option<Player> {
        match self {
            GamePhase::Player1Picks | GamePhase::Player1Puts => Some(Player::One),
            GamePhase::Player2Picks | GamePhase::Player2Puts => Some(Player::Two),
            GamePhase::Quatter(_) | GamePhase::Draw => None,
        }
    }

    /// Successor in the regular turn cycle. Terminal phases map to themselves.
    #[must_use]
    pub fn next_in_cycle(self) -> GamePhase {
        match self {
            GamePhase::Player1Picks => GamePhase::Player2Puts,
            GamePhase::Player2Puts => GamePhase::Player2Picks,
            GamePhase::Player2Picks => GamePhase::Player1Puts,
            GamePhase::Player1Puts => GamePhase::Player1Picks,
            terminal => terminal,
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GamePhase::Player1Picks => write!(f, "Player 1 picks"),
            GamePhase::Player2Puts => write!(f, "Player 2 puts"),
            GamePhase::Player2Picks => write!(f, "Player 2 picks"),
            GamePhase::Player1Puts => write!(f, "Player 1 puts"),
            GamePhase::Quatter(line) => write!(f, "Quatter ({line})"),
            GamePhase::Draw => write!(f, "Draw"),
        }
    }
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// The player who put the last piece of `line`.
    Winner { player: Player, line: WinningLine },
    /// Board filled without a winning line.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner { player: p, .. } if *p == player)
    }
}
