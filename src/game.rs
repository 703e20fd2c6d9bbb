use std::array::from_fn;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::action::{CardSource, CardTarget, PlayerId, PlayerMove};
use crate::card::{
    CENTER_COMPLETE_LEN, Card, HAND_SIZE, NUM_PACKS, PAY_OFF_SIZE, STACK_COUNT, full_deck,
};
use crate::error::{GameError, InvalidMove};
use crate::state::{BoardView, SideView, center_accepts};

const DEFAULT_SEED: u64 = 0x5EED_BA5E_D00D_CAFE;

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// Builder that enables deterministic deck injection for testing.
pub struct GameBuilder {
    seed: u64,
    deck: Option<Vec<Card>>,
    pay_off_size: usize,
    jokers: bool,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            deck: None,
            pay_off_size: PAY_OFF_SIZE,
            jokers: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Inject an exact deck instead of shuffling a fresh one. Cards are dealt
    /// by popping from the end: player 0's pay-off pile first, then player
    /// 0's hand, then player 1's pay-off and hand; the remainder is the
    /// stock with its top at the end.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Override the standard 20-card pay-off deal to shorten test games.
    pub fn with_pay_off_size(mut self, pay_off_size: usize) -> Self {
        self.pay_off_size = pay_off_size;
        self
    }

    /// Include the two jokers per pack when building the deck.
    pub fn with_jokers(mut self, jokers: bool) -> Self {
        self.jokers = jokers;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Authoritative Spite and Malice rules engine. Owns the full hidden state,
/// validates every move, and performs the turn bookkeeping (hand refills,
/// completed-stack recycling, turn hand-over, win detection).
#[derive(Debug)]
pub struct Game {
    players: [PlayerSide; 2],
    center_stacks: [Vec<Card>; STACK_COUNT],
    stock: Vec<Card>,
    active_player: PlayerId,
    status: GameStatus,
    rng: StdRng,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            seed,
            deck,
            pay_off_size,
            jokers,
        } = builder;
        if pay_off_size == 0 {
            return Err(GameError::InvalidConfiguration(
                "pay-off size must be positive",
            ));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = match deck {
            Some(deck) => deck,
            None => {
                let mut deck = full_deck(NUM_PACKS, jokers);
                deck.shuffle(&mut rng);
                deck
            }
        };
        if deck.len() < 2 * (pay_off_size + HAND_SIZE) {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal",
            ));
        }

        let players = from_fn(|_| {
            let mut pay_off = Vec::with_capacity(pay_off_size);
            for _ in 0..pay_off_size {
                pay_off.push(deck.pop().expect("deck length checked above"));
            }
            let mut hand = Vec::with_capacity(HAND_SIZE);
            for _ in 0..HAND_SIZE {
                hand.push(deck.pop().expect("deck length checked above"));
            }
            PlayerSide {
                pay_off,
                hand,
                discard_piles: from_fn(|_| Vec::new()),
            }
        });

        let mut game = Game {
            players,
            center_stacks: from_fn(|_| Vec::new()),
            stock: deck,
            active_player: 0,
            status: GameStatus::Ongoing,
            rng,
        };
        // The side showing the higher pay-off card opens the game.
        let top_value = |side: &PlayerSide| side.pay_off.last().map_or(0, Card::value);
        game.active_player = if top_value(&game.players[0]) > top_value(&game.players[1]) {
            0
        } else {
            1
        };
        Ok(game)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::Ongoing => None,
        }
    }

    pub fn current_player(&self) -> PlayerId {
        self.active_player
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn hand_len(&self, player: PlayerId) -> usize {
        self.players[player].hand.len()
    }

    pub fn pay_off_len(&self, player: PlayerId) -> usize {
        self.players[player].pay_off.len()
    }

    pub fn discard_pile(&self, player: PlayerId, pile: usize) -> &[Card] {
        &self.players[player].discard_piles[pile]
    }

    pub fn center_stack(&self, stack: usize) -> &[Card] {
        &self.center_stacks[stack]
    }

    /// Center-stack legality against the live board.
    pub fn can_place_card_in_center(&self, stack: usize, card: Card) -> bool {
        let Some(pile) = self.center_stacks.get(stack) else {
            return false;
        };
        center_accepts(pile.len() as u8, card)
    }

    /// Visible snapshot for the active player. The opponent's hand is
    /// excluded; the engine simulates on a clone of this view and never
    /// touches the live state.
    pub fn view(&self) -> BoardView {
        let acting = self.side_view(self.active_player, true);
        let opponent = self.side_view(1 - self.active_player, false);
        let center = from_fn(|idx| self.center_stacks[idx].len() as u8);
        BoardView::new(acting, opponent, center)
    }

    fn side_view(&self, player: PlayerId, include_hand: bool) -> SideView {
        let side = &self.players[player];
        SideView {
            hand: if include_hand {
                side.hand.clone()
            } else {
                Vec::new()
            },
            pay_off_top: side.pay_off.last().copied(),
            pay_off_len: side.pay_off.len(),
            discard_piles: side.discard_piles.clone(),
        }
    }

    /// Validates and applies one move for the active player, then performs
    /// the turn bookkeeping: win detection, recycling of completed center
    /// stacks, hand refills, and the hand-over after a discard.
    pub fn apply_move(&mut self, mv: PlayerMove) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }

        match mv.target {
            CardTarget::Center(stack) => {
                if stack >= STACK_COUNT {
                    return Err(InvalidMove::PileIndex(stack).into());
                }
                if !self.can_place_card_in_center(stack, mv.card) {
                    return Err(InvalidMove::IllegalCenterPlacement {
                        stack,
                        card: mv.card,
                    }
                    .into());
                }
            }
            CardTarget::Discard(pile) => {
                if pile >= STACK_COUNT {
                    return Err(InvalidMove::PileIndex(pile).into());
                }
                if mv.card.is_wild_high() {
                    return Err(InvalidMove::DiscardedWildHigh(mv.card).into());
                }
                if !matches!(mv.source, CardSource::Hand) {
                    return Err(InvalidMove::DiscardFromNonHand.into());
                }
            }
        }

        self.take_from_source(mv)?;
        match mv.target {
            CardTarget::Center(stack) => self.center_stacks[stack].push(mv.card),
            CardTarget::Discard(pile) => {
                self.players[self.active_player].discard_piles[pile].push(mv.card)
            }
        }

        if self.players[self.active_player].pay_off.is_empty() {
            self.status = GameStatus::Finished {
                winner: self.active_player,
            };
            return Ok(());
        }

        self.mix_into_stock();

        match mv.target {
            CardTarget::Center(_) => {
                if self.players[self.active_player].hand.is_empty() {
                    self.fill_hand(self.active_player);
                }
            }
            CardTarget::Discard(_) => {
                self.active_player = 1 - self.active_player;
                self.fill_hand(self.active_player);
            }
        }
        Ok(())
    }

    fn take_from_source(&mut self, mv: PlayerMove) -> Result<(), InvalidMove> {
        let side = &mut self.players[self.active_player];
        let missing = InvalidMove::CardNotAtSource {
            card: mv.card,
            at: mv.source,
        };
        match mv.source {
            CardSource::Hand => {
                let Some(pos) = side.hand.iter().position(|c| *c == mv.card) else {
                    return Err(missing);
                };
                side.hand.remove(pos);
            }
            CardSource::PayOff => {
                if side.pay_off.last() != Some(&mv.card) {
                    return Err(missing);
                }
                side.pay_off.pop();
            }
            CardSource::Discard(pile) => {
                if pile >= STACK_COUNT {
                    return Err(InvalidMove::PileIndex(pile));
                }
                if side.discard_piles[pile].last() != Some(&mv.card) {
                    return Err(missing);
                }
                side.discard_piles[pile].pop();
            }
        }
        Ok(())
    }

    /// Completed center stacks are shuffled back under the stock.
    fn mix_into_stock(&mut self) {
        for stack in &mut self.center_stacks {
            if stack.len() == CENTER_COMPLETE_LEN {
                let mut cards = std::mem::take(stack);
                cards.shuffle(&mut self.rng);
                self.stock.splice(0..0, cards);
            }
        }
    }

    fn fill_hand(&mut self, player: PlayerId) {
        while self.players[player].hand.len() < HAND_SIZE {
            match self.stock.pop() {
                Some(card) => self.players[player].hand.push(card),
                None => break,
            }
        }
    }
}

#[derive(Debug)]
struct PlayerSide {
    pay_off: Vec<Card>,
    hand: Vec<Card>,
    discard_piles: [Vec<Card>; STACK_COUNT],
}
