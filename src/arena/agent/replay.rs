use crate::{
    arena::{action::AgentAction, game_state::TableView},
    core::Card,
};

use super::Agent;

/// A replay agent that plays back a fixed script of actions, then keeps
/// returning the default once the script runs out.
#[derive(Debug, Clone)]
pub struct VecReplayAgent {
    actions: Vec<AgentAction>,
    idx: usize,
    default: AgentAction,
}

impl VecReplayAgent {
    pub fn new(actions: Vec<AgentAction>) -> Self {
        Self {
            actions,
            idx: 0,
            default: AgentAction::Fold,
        }
    }

    pub fn with_default(actions: Vec<AgentAction>, default: AgentAction) -> Self {
        Self {
            actions,
            idx: 0,
            default,
        }
    }
}

impl Agent for VecReplayAgent {
    fn act(&mut self, _view: &TableView<'_>, _hole: &[Card; 2]) -> AgentAction {
        let idx = self.idx;
        self.idx += 1;
        self.actions.get(idx).copied().unwrap_or(self.default)
    }
}
