//! `Agent`s are the bots that sit at the table. Each one is a betting
//! policy: given what they can see, pick an action.
//!
//! The simple ones (`AllInAgent`, `CallingAgent`, `FoldingAgent`) make
//! good baselines and test fixtures. `AggressiveAgent`,
//! `ConservativeAgent` and `RandomAgent` are the tournament bots.
mod aggressive;
mod all_in;
mod calling;
mod conservative;
mod folding;
mod random;
mod replay;

use crate::core::Card;

use super::{action::AgentAction, game_state::TableView};

/// This is the trait that you need to implement in order to implement
/// different strategies. It's up to you to implement the logic and state.
///
/// The table never lets an agent touch chips directly. Whatever comes back
/// is validated and clamped before it's applied.
pub trait Agent {
    /// Called by the betting round when it's this agent's turn.
    fn act(&mut self, view: &TableView<'_>, hole: &[Card; 2]) -> AgentAction;
}

pub use aggressive::AggressiveAgent;
pub use all_in::AllInAgent;
pub use calling::CallingAgent;
pub use conservative::ConservativeAgent;
pub use folding::FoldingAgent;
pub use random::RandomAgent;
pub use replay::VecReplayAgent;
