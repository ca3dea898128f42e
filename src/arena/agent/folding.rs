use crate::{
    arena::{action::AgentAction, game_state::TableView},
    core::Card,
};

use super::Agent;

/// Checks when it's free and folds to any bet.
#[derive(Default, Debug, Clone, Copy)]
pub struct FoldingAgent;

impl Agent for FoldingAgent {
    fn act(&mut self, view: &TableView<'_>, _hole: &[Card; 2]) -> AgentAction {
        if view.can_check() {
            AgentAction::Check
        } else {
            AgentAction::Fold
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::arena::{HoldemSimulationBuilder, game_state::Round};

    #[test_log::test]
    fn test_folding_agents() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut sim = HoldemSimulationBuilder::default()
            .agents(vec![Box::new(FoldingAgent), Box::new(FoldingAgent)])
            .stacks(vec![100, 100])
            .big_blind_idx(0)
            .build()
            .unwrap();

        let result = sim.run(&mut rng).unwrap();

        // Heads up the small blind is seat 1 and acts first, folding to the
        // big blind.
        assert_eq!(Some(0), result.winner_by_fold);
        assert_eq!(Round::Complete, sim.round);
        assert_eq!(15, result.pot);
        assert_eq!(105, sim.seats[0].stack);
        assert_eq!(95, sim.seats[1].stack);
    }
}
