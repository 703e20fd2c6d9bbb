use std::fmt;

use serde::{Deserialize, Serialize};

/// Rank of a playing card. Aces are the wild-low rank (playable only on an
/// empty center stack); kings and the optional jokers are wild-high
/// (playable on any center stack, never discardable).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

/// Suit of a playing card. Suits never affect legality; they exist for
/// display and to keep cards distinguishable across the two packs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

/// A single playing card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// Number of center stacks, and of discard piles per player.
pub const STACK_COUNT: usize = 4;
/// Cards held in hand at the start of a turn.
pub const HAND_SIZE: usize = 5;
/// Cards dealt to each player's pay-off pile.
pub const PAY_OFF_SIZE: usize = 20;
/// A center stack holding this many cards is complete and gets recycled.
pub const CENTER_COMPLETE_LEN: usize = 12;
/// Packs shuffled together for a standard game.
pub const NUM_PACKS: usize = 2;

pub const SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

const PACK_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

impl Rank {
    /// Numeric rank value used by every legality and distance comparison.
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Joker => 14,
        }
    }
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Numeric rank value of the card.
    #[inline]
    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    /// Returns true for the wild-low rank (empty-stack placement only).
    #[inline]
    pub fn is_wild_low(&self) -> bool {
        matches!(self.rank, Rank::Ace)
    }

    /// Returns true for the wild-high ranks (any-stack placement, no discard).
    #[inline]
    pub fn is_wild_high(&self) -> bool {
        matches!(self.rank, Rank::King | Rank::Joker)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self.rank {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Joker => "Jo",
        };
        let suit = match self.suit {
            Suit::Hearts => '\u{2665}',
            Suit::Diamonds => '\u{2666}',
            Suit::Clubs => '\u{2663}',
            Suit::Spades => '\u{2660}',
        };
        write!(f, "{rank}{suit}")
    }
}

/// Builds the full game deck in deterministic order (unshuffled). A pack is
/// 52 cards; each pack optionally contributes two jokers.
pub fn full_deck(num_packs: usize, jokers: bool) -> Vec<Card> {
    let mut deck = Vec::with_capacity(num_packs * 54);
    for _ in 0..num_packs {
        for suit in SUITS {
            for rank in PACK_RANKS {
                deck.push(Card::new(rank, suit));
            }
        }
        if jokers {
            deck.push(Card::new(Rank::Joker, Suit::Spades));
            deck.push(Card::new(Rank::Joker, Suit::Diamonds));
        }
    }
    deck
}
