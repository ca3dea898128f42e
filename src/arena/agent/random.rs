use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    arena::{action::AgentAction, game_state::TableView},
    core::Card,
};

use super::Agent;

/// Picks fold, call or raise with equal odds, ignoring the cards.
///
/// A fold when checking is free becomes a check.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()))
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, view: &TableView<'_>, _hole: &[Card; 2]) -> AgentAction {
        match self.rng.random_range(0..3) {
            0 if view.can_check() => AgentAction::Check,
            0 => AgentAction::Fold,
            1 => AgentAction::Call,
            _ => AgentAction::Raise(view.min_bet.saturating_mul(2)),
        }
    }
}
