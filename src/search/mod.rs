//! Move-selection search for a single turn.
//!
//! The tree simulates one agent turn — a chain of center placements followed
//! by at most one discard — and then the opponent's immediate center replies,
//! to price in the downside of freshly exposed center-stack progress. Every
//! node carries the cumulative heuristic value of its path; the best terminal
//! node's agent-side actions become the play queue for the real turn. The
//! expansion is depth-first, pre-order and runs to completion before the
//! first move is handed back; each search works on its own snapshot, so
//! nothing is shared across turns.

pub mod eval;
pub mod movegen;
pub mod node;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, trace};

use crate::action::{CardSource, PlayerMove};
use crate::error::SearchError;
use crate::state::BoardView;

pub use eval::{RANK_CYCLE, Weights, closest_center_distance, least_essential, rank_distance};
pub use movegen::{DiscardGroup, discard_target_groups};
pub use node::{ActingSide, NodeId, SearchNode};

const ROOT: NodeId = NodeId(0);

/// Chooses the move queue for one real turn: build and score the full tree,
/// pick the best terminal (uniformly at random among ties), and reconstruct
/// the agent's own actions from root to leaf.
pub fn plan_turn<R: Rng + ?Sized>(
    view: &BoardView,
    weights: &Weights,
    rng: &mut R,
) -> Result<Vec<PlayerMove>, SearchError> {
    let mut tree = SearchTree::with_weights(view.clone(), *weights);
    tree.run();
    tree.build_play_queue(rng)
}

/// Arena-allocated search tree over reachable positions. Built fresh for
/// every turn decision and discarded once the play queue is extracted.
pub struct SearchTree {
    arena: Vec<SearchNode>,
    terminals: Vec<NodeId>,
    weights: Weights,
}

impl SearchTree {
    pub fn new(root_state: BoardView) -> Self {
        Self::with_weights(root_state, Weights::default())
    }

    pub fn with_weights(root_state: BoardView, weights: Weights) -> Self {
        Self {
            arena: vec![SearchNode::root(root_state)],
            terminals: Vec::new(),
            weights,
        }
    }

    /// Number of materialized nodes.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of terminal nodes collected so far.
    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    /// Expands and scores every branch until it reaches a terminal node.
    pub fn run(&mut self) {
        self.visit(ROOT);
    }

    fn visit(&mut self, id: NodeId) {
        if let Some(parent_id) = self.arena[id.index()].parent {
            let (incremental, base) = {
                let node = &self.arena[id.index()];
                let parent = &self.arena[parent_id.index()];
                let action = node.action.expect("non-root nodes always carry an action");
                (
                    eval::evaluate_move(&self.weights, &parent.state, &node.state, action, node.acting),
                    parent.util_value,
                )
            };
            self.arena[id.index()].util_value = base + incremental;
            trace!(
                node = id.0,
                incremental,
                util = self.arena[id.index()].util_value,
                "scored node"
            );
        }

        if self.is_early_terminal(id) {
            self.terminals.push(id);
            return;
        }

        let children = self.expand(id);
        if self.is_post_expansion_terminal(id) {
            self.terminals.push(id);
            return;
        }
        for child in children {
            self.visit(child);
        }
    }

    /// Terminal conditions decidable before successor generation, in
    /// priority order: a pay-off card was played (either side); the agent
    /// emptied its hand without discarding; the agent's very first action
    /// was a discard.
    fn is_early_terminal(&self, id: NodeId) -> bool {
        let node = &self.arena[id.index()];
        let Some(action) = node.action else {
            return false;
        };
        if matches!(action.source, CardSource::PayOff) {
            return true;
        }
        if node.acting == ActingSide::Agent
            && !action.is_discard()
            && node.state.player(false).hand.is_empty()
        {
            return true;
        }
        if action.is_discard() {
            let parent = node.parent.expect("nodes with an action have a parent");
            if self.arena[parent.index()].action.is_none() {
                return true;
            }
        }
        false
    }

    /// After expansion: an agent discard always continues into the
    /// opponent's replies; any other node with no successors has exhausted
    /// its line.
    fn is_post_expansion_terminal(&self, id: NodeId) -> bool {
        let node = &self.arena[id.index()];
        if node.acting == ActingSide::Agent && node.is_discard() {
            return false;
        }
        node.children.is_empty()
    }

    /// Generates successors and attaches them to the node. The enumeration
    /// itself is pure (`successors`); only the attachment mutates the tree.
    fn expand(&mut self, id: NodeId) -> Vec<NodeId> {
        let (moves, swap, acting) = successors(&self.arena[id.index()]);
        debug!(node = id.0, count = moves.len(), "generated successors");
        let parent_state = self.arena[id.index()].state.clone();
        let mut ids = Vec::with_capacity(moves.len());
        for mv in moves {
            let mut state = parent_state.clone();
            if swap {
                state.swap_active_side();
            }
            state
                .place_card(mv)
                .expect("generated moves are legal by construction");
            let child_id = NodeId(self.arena.len() as u32);
            self.arena.push(SearchNode::child(state, mv, id, acting));
            ids.push(child_id);
        }
        self.arena[id.index()].children = ids.clone();
        ids
    }

    /// Picks the best terminal and rebuilds the agent's move chain,
    /// dropping interleaved opponent nodes and the root placeholder.
    pub fn build_play_queue<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<PlayerMove>, SearchError> {
        if self.terminals.is_empty() {
            return Err(SearchError::NoTerminalNodes);
        }
        let best_value = self
            .terminals
            .iter()
            .map(|id| self.arena[id.index()].util_value)
            .max()
            .expect("terminal set is non-empty");
        let best: Vec<NodeId> = self
            .terminals
            .iter()
            .copied()
            .filter(|id| self.arena[id.index()].util_value == best_value)
            .collect();
        let chosen = *best.choose(rng).expect("at least one best terminal");
        info!(
            terminals = self.terminals.len(),
            ties = best.len(),
            util = best_value,
            "selected search path"
        );

        let mut queue = Vec::new();
        let mut cursor = Some(chosen);
        while let Some(id) = cursor {
            let node = &self.arena[id.index()];
            cursor = node.parent;
            if node.acting == ActingSide::Opponent {
                continue;
            }
            if let Some(action) = node.action {
                queue.push(action);
            }
        }
        queue.reverse();
        if queue.is_empty() {
            return Err(SearchError::NoMovesAvailable);
        }
        Ok(queue)
    }
}

/// Successor family for a node: an agent node that has not discarded
/// extends the agent's own turn; an agent discard hands over to the
/// opponent (the child state's perspective is swapped once); opponent nodes
/// chain further opponent center replies on the already-swapped state.
fn successors(node: &SearchNode) -> (Vec<PlayerMove>, bool, ActingSide) {
    match node.acting {
        ActingSide::Agent if !node.is_discard() => {
            (movegen::agent_moves(&node.state), false, ActingSide::Agent)
        }
        ActingSide::Agent => (
            movegen::opponent_center_moves(&node.state, true),
            true,
            ActingSide::Opponent,
        ),
        ActingSide::Opponent => (
            movegen::opponent_center_moves(&node.state, false),
            false,
            ActingSide::Opponent,
        ),
    }
}
