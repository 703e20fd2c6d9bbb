use serde::{Deserialize, Serialize};

use crate::action::{CardSource, CardTarget, PlayerMove};
use crate::card::{Card, STACK_COUNT};
use crate::error::InvalidMove;

/// Visible cards of one side. For the opponent the hand is empty: hidden
/// information never enters a snapshot handed to simulation.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SideView {
    pub hand: Vec<Card>,
    pub pay_off_top: Option<Card>,
    pub pay_off_len: usize,
    pub discard_piles: [Vec<Card>; STACK_COUNT],
}

impl SideView {
    /// Top card of the given discard pile, if any.
    pub fn discard_top(&self, pile: usize) -> Option<Card> {
        self.discard_piles.get(pile).and_then(|p| p.last()).copied()
    }
}

/// Snapshot of the board as seen by the side to act. Index 0 of `players` is
/// always the acting side; `swap_active_side` flips the orientation during
/// opponent-reply simulation. Center stacks are tracked by occupied length
/// only: a stack of height h accepts exactly the card of rank h + 1, a
/// wild-high card at any height, or a wild-low card when empty. Buried card
/// identities are irrelevant once placed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardView {
    players: [SideView; 2],
    pub center: [u8; STACK_COUNT],
}

impl BoardView {
    pub fn new(acting: SideView, opponent: SideView, center: [u8; STACK_COUNT]) -> Self {
        Self {
            players: [acting, opponent],
            center,
        }
    }

    /// View of the acting side (`other = false`) or its opponent.
    pub fn player(&self, other: bool) -> &SideView {
        &self.players[usize::from(other)]
    }

    /// Flips which side is acting. Used only inside opponent-reply
    /// simulation, never against the live game.
    pub fn swap_active_side(&mut self) {
        self.players.swap(0, 1);
    }

    /// Exact center-stack legality rule, driven by stack height alone.
    pub fn can_place_in_center(&self, stack: usize, card: Card) -> bool {
        match self.center.get(stack) {
            Some(&height) => center_accepts(height, card),
            None => false,
        }
    }

    /// Validates and applies a move for the acting side.
    pub fn place_card(&mut self, mv: PlayerMove) -> Result<(), InvalidMove> {
        match mv.target {
            CardTarget::Center(stack) => {
                if stack >= STACK_COUNT {
                    return Err(InvalidMove::PileIndex(stack));
                }
                if !self.can_place_in_center(stack, mv.card) {
                    return Err(InvalidMove::IllegalCenterPlacement {
                        stack,
                        card: mv.card,
                    });
                }
            }
            CardTarget::Discard(pile) => {
                if pile >= STACK_COUNT {
                    return Err(InvalidMove::PileIndex(pile));
                }
                if mv.card.is_wild_high() {
                    return Err(InvalidMove::DiscardedWildHigh(mv.card));
                }
                if !matches!(mv.source, CardSource::Hand) {
                    return Err(InvalidMove::DiscardFromNonHand);
                }
            }
        }

        self.take_from_source(mv)?;

        match mv.target {
            CardTarget::Center(stack) => self.center[stack] += 1,
            CardTarget::Discard(pile) => self.players[0].discard_piles[pile].push(mv.card),
        }
        Ok(())
    }

    fn take_from_source(&mut self, mv: PlayerMove) -> Result<(), InvalidMove> {
        let acting = &mut self.players[0];
        let missing = InvalidMove::CardNotAtSource {
            card: mv.card,
            at: mv.source,
        };
        match mv.source {
            CardSource::Hand => {
                let Some(pos) = acting.hand.iter().position(|c| *c == mv.card) else {
                    return Err(missing);
                };
                acting.hand.remove(pos);
            }
            CardSource::PayOff => {
                if acting.pay_off_top != Some(mv.card) {
                    return Err(missing);
                }
                // The card underneath stays hidden until the live game
                // reveals it, so the simulated top becomes unknown.
                acting.pay_off_top = None;
                acting.pay_off_len = acting.pay_off_len.saturating_sub(1);
            }
            CardSource::Discard(pile) => {
                if pile >= STACK_COUNT {
                    return Err(InvalidMove::PileIndex(pile));
                }
                if acting.discard_piles[pile].last() != Some(&mv.card) {
                    return Err(missing);
                }
                acting.discard_piles[pile].pop();
            }
        }
        Ok(())
    }
}

/// Center-stack acceptance by occupied height: wild-high anywhere, wild-low
/// on an empty stack, otherwise exactly the rank one above the height.
pub(crate) fn center_accepts(height: u8, card: Card) -> bool {
    if card.is_wild_high() {
        return true;
    }
    if card.is_wild_low() {
        return height == 0;
    }
    card.value() == height + 1
}
