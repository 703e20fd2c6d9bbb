//! Legal elementary move enumeration for the simulated search.
//!
//! The agent's own turn offers center placements from hand, pay-off top and
//! discard tops, plus discards from the hand. The opponent is simulated from
//! its visible piles only; its hand is hidden and never consulted.

use crate::action::{CardSource, PlayerMove};
use crate::card::{Card, STACK_COUNT};
use crate::state::{BoardView, SideView};

/// Discard-pile targets exposing the same top rank (or emptiness) are
/// heuristically interchangeable; each group is represented by its lowest
/// pile id when generating moves, with the full membership kept for the
/// bury heuristic and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardGroup {
    /// Top rank value shared by the group, `None` for empty piles.
    pub top: Option<u8>,
    pub piles: Vec<usize>,
}

impl DiscardGroup {
    pub fn representative(&self) -> usize {
        self.piles[0]
    }
}

/// Groups the side's discard piles by their exposed top rank.
pub fn discard_target_groups(side: &SideView) -> Vec<DiscardGroup> {
    let mut groups: Vec<DiscardGroup> = Vec::with_capacity(STACK_COUNT);
    for pile in 0..STACK_COUNT {
        let top = side.discard_top(pile).map(|c| c.value());
        match groups.iter_mut().find(|g| g.top == top) {
            Some(group) => group.piles.push(pile),
            None => groups.push(DiscardGroup {
                top,
                piles: vec![pile],
            }),
        }
    }
    groups
}

/// Every legal move for the acting side's own turn, duplicate-free.
pub fn agent_moves(view: &BoardView) -> Vec<PlayerMove> {
    let mut moves = agent_center_moves(view);
    for mv in agent_discard_moves(view) {
        push_unique(&mut moves, mv);
    }
    moves
}

/// Center placements from the acting side's hand, pay-off top and discard
/// tops.
pub fn agent_center_moves(view: &BoardView) -> Vec<PlayerMove> {
    let side = view.player(false);
    let mut moves = Vec::new();
    for &card in &side.hand {
        center_moves_for_card(view, card, CardSource::Hand, &mut moves);
    }
    if let Some(card) = side.pay_off_top {
        center_moves_for_card(view, card, CardSource::PayOff, &mut moves);
    }
    for pile in 0..STACK_COUNT {
        if let Some(card) = side.discard_top(pile) {
            center_moves_for_card(view, card, CardSource::Discard(pile), &mut moves);
        }
    }
    moves
}

/// Discards of every non-wild-high hand card into one representative pile
/// per discard-target group.
pub fn agent_discard_moves(view: &BoardView) -> Vec<PlayerMove> {
    let side = view.player(false);
    let groups = discard_target_groups(side);
    let mut moves = Vec::new();
    for &card in &side.hand {
        if card.is_wild_high() {
            continue;
        }
        for group in &groups {
            push_unique(
                &mut moves,
                PlayerMove::to_discard(card, group.representative()),
            );
        }
    }
    moves
}

/// Center placements for the opponent's simulated replies: pay-off top and
/// discard tops only. The hand is excluded even if a snapshot carries one.
/// `other` selects which of the view's two sides is the opponent — true
/// before the perspective swap, false once the view is already swapped.
pub fn opponent_center_moves(view: &BoardView, other: bool) -> Vec<PlayerMove> {
    let side = view.player(other);
    let mut moves = Vec::new();
    if let Some(card) = side.pay_off_top {
        center_moves_for_card(view, card, CardSource::PayOff, &mut moves);
    }
    for pile in 0..STACK_COUNT {
        if let Some(card) = side.discard_top(pile) {
            center_moves_for_card(view, card, CardSource::Discard(pile), &mut moves);
        }
    }
    moves
}

fn center_moves_for_card(view: &BoardView, card: Card, source: CardSource, moves: &mut Vec<PlayerMove>) {
    for stack in 0..STACK_COUNT {
        if view.can_place_in_center(stack, card) {
            push_unique(moves, PlayerMove::to_center(card, source, stack));
        }
    }
}

/// Twin cards from the two packs would otherwise emit equal moves.
fn push_unique(moves: &mut Vec<PlayerMove>, mv: PlayerMove) {
    if !moves.contains(&mv) {
        moves.push(mv);
    }
}
