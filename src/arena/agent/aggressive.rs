use crate::{
    arena::{action::AgentAction, game_state::TableView},
    core::Card,
};

use super::Agent;

/// Raises by twice the minimum bet every single time. Once the street's
/// raise cap is hit the table turns that into a call.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggressiveAgent;

impl Agent for AggressiveAgent {
    fn act(&mut self, view: &TableView<'_>, _hole: &[Card; 2]) -> AgentAction {
        AgentAction::Raise(view.min_bet.saturating_mul(2))
    }
}
