//! Spite and Malice engine: a search-driven automated player with the
//! authoritative two-player rules model it plays against.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod error;
pub mod game;
pub mod search;
pub mod state;
pub mod visualize;

pub use crate::action::{CardSource, CardTarget, PlayerId, PlayerMove};
pub use crate::bot::Bot;
pub use crate::bots::{HumanBot, RandomBot, SearchBot};
pub use crate::card::{Card, Rank, Suit};
pub use crate::error::{GameError, InvalidMove, SearchError};
pub use crate::game::{Game, GameBuilder, GameStatus};
pub use crate::search::{SearchTree, Weights, plan_turn};
pub use crate::state::{BoardView, SideView};
pub use crate::visualize::{describe_move, render_view};
