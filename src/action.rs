use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Location a card is taken from when performing a move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardSource {
    /// Card from the acting player's hand.
    Hand,
    /// Top card of the acting player's pay-off pile.
    PayOff,
    /// Top card of one of the acting player's discard piles.
    Discard(usize),
}

/// Location a card is placed onto.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardTarget {
    /// One of the acting player's discard piles. Ends the turn.
    Discard(usize),
    /// One of the four shared center stacks.
    Center(usize),
}

/// One atomic transition: a card moved from a source pile to a target pile.
/// Equality is structural. Source and target are always fully resolved; the
/// enum payloads carry the pile indices where one is needed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlayerMove {
    pub card: Card,
    pub source: CardSource,
    pub target: CardTarget,
}

impl PlayerMove {
    /// A play onto a center stack.
    pub fn to_center(card: Card, source: CardSource, stack: usize) -> Self {
        Self {
            card,
            source,
            target: CardTarget::Center(stack),
        }
    }

    /// A discard from the hand onto a discard pile.
    pub fn to_discard(card: Card, pile: usize) -> Self {
        Self {
            card,
            source: CardSource::Hand,
            target: CardTarget::Discard(pile),
        }
    }

    /// Returns true when the move ends the turn by discarding.
    #[inline]
    pub fn is_discard(&self) -> bool {
        matches!(self.target, CardTarget::Discard(_))
    }

    /// Returns true when the move targets a center stack.
    #[inline]
    pub fn is_center_play(&self) -> bool {
        matches!(self.target, CardTarget::Center(_))
    }
}
