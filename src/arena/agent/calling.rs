use crate::{
    arena::{action::AgentAction, game_state::TableView},
    core::Card,
};

use super::Agent;

/// Calls anything. A calling station for the whole hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingAgent;

impl Agent for CallingAgent {
    fn act(&mut self, _view: &TableView<'_>, _hole: &[Card; 2]) -> AgentAction {
        AgentAction::Call
    }
}
