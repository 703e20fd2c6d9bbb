use crate::action::PlayerMove;
use crate::state::BoardView;

/// Interface for anything that can play a turn, one move at a time. The
/// controller calls this with the active player's visible board and applies
/// the returned move to the authoritative game.
pub trait Bot {
    fn select_move(&mut self, view: &BoardView) -> PlayerMove;
}
