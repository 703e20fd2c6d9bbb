use crate::action::PlayerMove;
use crate::state::BoardView;

/// Index into the search-tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which side's simulated turn produced a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActingSide {
    Agent,
    Opponent,
}

/// One reachable future position. Children are owned by the arena and
/// referenced by id; parent links are plain back-references used only for
/// path reconstruction. The tree is built strictly forward from the root,
/// so no cycles can form and no node is expanded twice.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Board after applying the path of moves from the root to here.
    pub state: BoardView,
    /// The move that produced this node; `None` only at the root.
    pub action: Option<PlayerMove>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Cumulative heuristic score from the root; 0 at the root.
    pub util_value: i32,
    pub acting: ActingSide,
}

impl SearchNode {
    pub fn root(state: BoardView) -> Self {
        Self {
            state,
            action: None,
            parent: None,
            children: Vec::new(),
            util_value: 0,
            acting: ActingSide::Agent,
        }
    }

    pub fn child(
        state: BoardView,
        action: PlayerMove,
        parent: NodeId,
        acting: ActingSide,
    ) -> Self {
        Self {
            state,
            action: Some(action),
            parent: Some(parent),
            children: Vec::new(),
            util_value: 0,
            acting,
        }
    }

    /// True when this node's action ended the simulated sub-turn by
    /// discarding.
    #[inline]
    pub fn is_discard(&self) -> bool {
        self.action.is_some_and(|mv| mv.is_discard())
    }
}
