use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::PlayerMove;
use crate::bot::Bot;
use crate::search::movegen;
use crate::state::BoardView;

/// Baseline bot that samples uniformly from the legal move set.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_move(&mut self, view: &BoardView) -> PlayerMove {
        movegen::agent_moves(view)
            .choose(&mut self.rng)
            .copied()
            .expect("at least one legal move must be available")
    }
}
