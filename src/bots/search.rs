use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::PlayerMove;
use crate::bot::Bot;
use crate::search::{Weights, plan_turn};
use crate::state::BoardView;

const DEFAULT_SEED: u64 = 0x0DD5_EED5_0F5E_A2C4;

/// The search-driven player. One full tree search per real turn produces a
/// queue of moves that is then drained one call at a time; the queue never
/// outlives the turn it was planned for (every plan ends at a discard, a
/// pay-off play or an emptied hand, each of which forces a re-plan with
/// fresh information). Pacing between drained moves is the caller's concern.
pub struct SearchBot {
    rng: StdRng,
    weights: Weights,
    play_queue: VecDeque<PlayerMove>,
}

impl SearchBot {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Seeds the tie-break choice among equal-value terminal paths.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            weights: Weights::default(),
            play_queue: VecDeque::new(),
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Number of pre-planned moves still queued.
    pub fn queued_moves(&self) -> usize {
        self.play_queue.len()
    }
}

impl Default for SearchBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for SearchBot {
    fn select_move(&mut self, view: &BoardView) -> PlayerMove {
        if let Some(mv) = self.play_queue.pop_front() {
            return mv;
        }
        let queue = plan_turn(view, &self.weights, &mut self.rng)
            .expect("search must produce a playable move for a live position");
        self.play_queue = queue.into();
        self.play_queue
            .pop_front()
            .expect("planned queues are never empty")
    }
}
