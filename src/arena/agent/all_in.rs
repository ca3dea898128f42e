use crate::{
    arena::{action::AgentAction, game_state::TableView},
    core::Card,
};

use super::Agent;

/// Shoves every time it's asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllInAgent;

impl Agent for AllInAgent {
    fn act(&mut self, _view: &TableView<'_>, _hole: &[Card; 2]) -> AgentAction {
        AgentAction::AllIn
    }
}
