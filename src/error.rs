use thiserror::Error;

use crate::action::CardSource;
use crate::card::Card;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),
    #[error("game is already over")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of moves rejected by the rules model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("center stack {stack} does not accept {card}")]
    IllegalCenterPlacement { stack: usize, card: Card },
    #[error("{0} is wild-high and may not be discarded")]
    DiscardedWildHigh(Card),
    #[error("discards must come from the hand")]
    DiscardFromNonHand,
    #[error("{card} is not available at {at:?}")]
    CardNotAtSource { card: Card, at: CardSource },
    #[error("pile index {0} is out of range")]
    PileIndex(usize),
}

/// Internal-consistency failures of the move-selection search. These indicate
/// a defect in expansion or terminal logic, or a position with no legal play
/// at all; they must surface loudly instead of degrading into an empty queue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search produced no terminal nodes")]
    NoTerminalNodes,
    #[error("no legal moves available from the current position")]
    NoMovesAvailable,
}
