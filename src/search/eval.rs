//! Incremental heuristic scoring of single move transitions.
//!
//! Scores are attributed to one (parent state, action, resulting state,
//! acting side) transition and accumulated along the path from the search
//! root, so every function here is a pure function of its inputs.

use crate::action::{CardSource, CardTarget, PlayerMove};
use crate::card::{Card, STACK_COUNT};
use crate::search::node::ActingSide;
use crate::state::BoardView;

/// Ranks participating in the center-stack cycle; the wild ranks sit outside
/// it, which is why the full-cycle distance is 11 and not 12.
pub const RANK_CYCLE: i32 = 11;

/// Named weights of the evaluation features. The relative structure (which
/// features exist and their signs) is what the search depends on; the
/// magnitudes are tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    /// Playing any card onto a center stack.
    pub center_play: i32,
    /// Per point of cyclic distance between the nearest center stack and the
    /// opponent's visible pay-off top, on center plays.
    pub op_pay_off_distance: i32,
    /// Playing the pay-off top, the single most valuable act in the game.
    pub pay_off_play: i32,
    /// Playing a card out of the hand.
    pub hand_play: i32,
    /// Emptying the hand without discarding.
    pub empty_hand: i32,
    /// Discarding onto an empty pile.
    pub discard_on_empty: i32,
    /// Discarding onto a card of the same rank.
    pub discard_same_rank: i32,
    /// Per remaining hand card sharing the discarded rank.
    pub discard_common: i32,
    /// The discarded card is the least essential of hand-plus-card.
    pub discard_least_essential: i32,
    /// The card buried by the discard was the least essential discard top.
    pub bury_least_essential: i32,
    /// Flat term for every simulated opponent reply.
    pub opponent_base: i32,
    /// Opponent unloading a discard top onto the center.
    pub opponent_discard_play: i32,
    /// Opponent playing its pay-off card.
    pub opponent_pay_off: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            center_play: 30,
            op_pay_off_distance: 10,
            pay_off_play: 400,
            hand_play: 20,
            empty_hand: 120,
            discard_on_empty: 35,
            discard_same_rank: 50,
            discard_common: 10,
            discard_least_essential: 5,
            bury_least_essential: 5,
            opponent_base: 0,
            opponent_discard_play: -20,
            opponent_pay_off: -300,
        }
    }
}

/// Cyclic distance from a center-stack state `pile_value` (its occupied
/// height) to a target rank. A height of zero is the empty sentinel, so the
/// distance degenerates to the target rank itself. Equal values cost a full
/// cycle: the rank was just passed and cannot be played this instant.
pub fn rank_distance(pile_value: u8, target: u8) -> i32 {
    let (p, t) = (i32::from(pile_value), i32::from(target));
    if t > p {
        t - p
    } else if t == p {
        RANK_CYCLE
    } else {
        RANK_CYCLE - p + t
    }
}

/// Distance from the center stack closest to accepting the target rank.
pub fn closest_center_distance(center: &[u8; STACK_COUNT], target: u8) -> i32 {
    center
        .iter()
        .map(|&height| rank_distance(height, target))
        .min()
        .expect("at least one center stack")
}

/// Index of the least essential card among `candidates`, relative to the
/// pay-off target rank. Each card accrues weight for every center stack it
/// blocks — its rank lying strictly between the stack's state and the
/// target, wrapping past the cycle — with stacks ordered by descending
/// distance-to-target so that blocking the closest stack weighs 2^3 and the
/// farthest 2^0. Minimum total weight wins; ties go to the first occurrence.
pub fn least_essential(
    center: &[u8; STACK_COUNT],
    candidates: &[Card],
    target: u8,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let mut order: [usize; STACK_COUNT] = [0, 1, 2, 3];
    order.sort_by_key(|&stack| std::cmp::Reverse(rank_distance(center[stack], target)));

    let blocking_weight = |card: &Card| -> u32 {
        let mut weight = 0;
        for (position, &stack) in order.iter().enumerate() {
            let to_target = rank_distance(center[stack], target);
            let to_card = rank_distance(center[stack], card.value());
            if to_card < to_target {
                weight += 1 << position;
            }
        }
        weight
    };

    candidates
        .iter()
        .enumerate()
        .min_by_key(|&(_, card)| blocking_weight(card))
        .map(|(index, _)| index)
}

/// Incremental heuristic value of one action. `parent` is the position the
/// action was taken from, `child` the position it produced; for opponent
/// nodes both are already oriented with the opponent as the acting side.
pub fn evaluate_move(
    weights: &Weights,
    parent: &BoardView,
    child: &BoardView,
    action: PlayerMove,
    acting: ActingSide,
) -> i32 {
    match acting {
        ActingSide::Agent => evaluate_agent_move(weights, parent, child, action),
        ActingSide::Opponent => evaluate_opponent_move(weights, action),
    }
}

fn evaluate_agent_move(
    weights: &Weights,
    parent: &BoardView,
    child: &BoardView,
    action: PlayerMove,
) -> i32 {
    let me_before = parent.player(false);
    let me_after = child.player(false);
    let mut value = 0;

    if matches!(action.source, CardSource::PayOff) {
        value += weights.pay_off_play;
    }
    if matches!(action.source, CardSource::Hand) {
        value += weights.hand_play;
    }
    if me_after.hand.is_empty() && !action.is_discard() {
        value += weights.empty_hand;
    }

    match action.target {
        CardTarget::Center(_) => {
            value += weights.center_play;
            // Keeping the center stacks far from the opponent's pay-off
            // rank is worth points; letting them creep close costs them.
            if let Some(op_top) = child.player(true).pay_off_top {
                value += weights.op_pay_off_distance
                    * closest_center_distance(&child.center, op_top.value());
            }
        }
        CardTarget::Discard(pile) => {
            let buried = me_before.discard_top(pile);
            if buried.is_none() {
                value += weights.discard_on_empty;
            }
            if buried.map(|c| c.value()) == Some(action.card.value()) {
                value += weights.discard_same_rank;
            }
            let common = me_after
                .hand
                .iter()
                .filter(|c| c.value() == action.card.value())
                .count() as i32;
            value += weights.discard_common * common;

            if let Some(pay_off) = me_before.pay_off_top {
                let target = pay_off.value();
                let mut candidates = Vec::with_capacity(me_after.hand.len() + 1);
                candidates.push(action.card);
                candidates.extend(me_after.hand.iter().copied());
                if least_essential(&child.center, &candidates, target) == Some(0) {
                    value += weights.discard_least_essential;
                }

                let mut tops = Vec::with_capacity(STACK_COUNT);
                let mut top_piles = Vec::with_capacity(STACK_COUNT);
                for (id, discard) in me_before.discard_piles.iter().enumerate() {
                    if let Some(card) = discard.last() {
                        tops.push(*card);
                        top_piles.push(id);
                    }
                }
                if let Some(index) = least_essential(&child.center, &tops, target) {
                    if top_piles[index] == pile {
                        value += weights.bury_least_essential;
                    }
                }
            }
        }
    }
    value
}

fn evaluate_opponent_move(weights: &Weights, action: PlayerMove) -> i32 {
    let mut value = weights.opponent_base;
    match action.source {
        CardSource::Discard(_) => value += weights.opponent_discard_play,
        CardSource::PayOff => value += weights.opponent_pay_off,
        CardSource::Hand => {}
    }
    value
}
