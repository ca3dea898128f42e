use rand::{SeedableRng, rngs::StdRng};
use tracing::{Level, event};

use crate::{
    arena::{action::AgentAction, game_state::TableView},
    core::Card,
    holdem::{DEFAULT_TRIALS, NO_INFORMATION_EQUITY, estimate_win_probability},
};

use super::Agent;

/// Only puts chips in with a strong hand.
///
/// Each decision estimates the chance of winning from the hole cards and
/// the board. Above `raise_threshold` it raises by twice the minimum bet,
/// above `call_threshold` it calls, otherwise it checks if that's free
/// and folds if it isn't.
#[derive(Debug, Clone)]
pub struct ConservativeAgent {
    raise_threshold: f64,
    call_threshold: f64,
    trials: usize,
    rng: StdRng,
}

impl ConservativeAgent {
    pub fn new(raise_threshold: f64, call_threshold: f64, trials: usize, rng: StdRng) -> Self {
        Self {
            raise_threshold,
            call_threshold,
            trials,
            rng,
        }
    }

    /// Default thresholds with a seeded rng, for repeatable games.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(0.9, 0.6, DEFAULT_TRIALS, StdRng::seed_from_u64(seed))
    }

    fn equity(&mut self, view: &TableView<'_>, hole: &[Card; 2]) -> f64 {
        match estimate_win_probability(
            *hole,
            view.community_cards,
            view.num_opponents,
            self.trials,
            &mut self.rng,
        ) {
            Ok(equity) => equity,
            Err(error) => {
                event!(Level::WARN, ?error, name = view.name, "equity_error");
                NO_INFORMATION_EQUITY
            }
        }
    }
}

impl Default for ConservativeAgent {
    fn default() -> Self {
        Self::new(
            0.9,
            0.6,
            DEFAULT_TRIALS,
            StdRng::from_rng(&mut rand::rng()),
        )
    }
}

impl Agent for ConservativeAgent {
    fn act(&mut self, view: &TableView<'_>, hole: &[Card; 2]) -> AgentAction {
        let equity = self.equity(view, hole);
        event!(Level::TRACE, name = view.name, equity, "conservative_equity");

        if equity > self.raise_threshold {
            AgentAction::Raise(view.min_bet.saturating_mul(2))
        } else if equity > self.call_threshold {
            AgentAction::Call
        } else if view.can_check() {
            AgentAction::Check
        } else {
            AgentAction::Fold
        }
    }
}
