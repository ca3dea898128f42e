//! This is the arena module where bots play hold'em against each other.
//!
//! # Single Hand
//!
//! A `HoldemSimulation` plays one hand. The tools allow explicit control
//! over the hand all the way down to the rng and the deck.
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use holdem_bots::arena::HoldemSimulationBuilder;
//! use holdem_bots::arena::agent::{AllInAgent, CallingAgent, RandomAgent};
//!
//! let agents: Vec<Box<dyn holdem_bots::arena::Agent>> = vec![
//!     Box::<CallingAgent>::default(),
//!     Box::new(RandomAgent::with_seed(7)),
//!     Box::<AllInAgent>::default(),
//! ];
//! let mut rng = StdRng::seed_from_u64(420);
//!
//! let mut sim = HoldemSimulationBuilder::default()
//!     .agents(agents)
//!     .stacks(vec![200, 200, 200])
//!     .min_bet(10)
//!     .build()
//!     .unwrap();
//!
//! let result = sim.run(&mut rng).unwrap();
//! assert_eq!(result.pot, result.winnings.iter().sum::<u32>());
//! assert_eq!(600, sim.seats.iter().map(|s| s.stack).sum::<u32>());
//! ```
//!
//! # `SingleTableTournament`
//!
//! It's also possible to keep the same bots at the table hand after hand
//! until one of them has every chip.
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use holdem_bots::arena::Agent;
//! use holdem_bots::arena::agent::{AggressiveAgent, AllInAgent, ConservativeAgent, RandomAgent};
//! use holdem_bots::arena::tournament::SingleTableTournamentBuilder;
//!
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     Box::<AggressiveAgent>::default(),
//!     Box::new(ConservativeAgent::with_seed(1)),
//!     Box::<AllInAgent>::default(),
//!     Box::new(RandomAgent::with_seed(2)),
//! ];
//!
//! let tournament = SingleTableTournamentBuilder::default()
//!     .agents(agents)
//!     .starting_stacks(vec![200; 4])
//!     .min_bet(10)
//!     .max_hands(10)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(420);
//! let results = tournament.run(&mut rng).unwrap();
//! assert_eq!(800, results.stacks.iter().sum::<u32>());
//! ```
pub mod action;
pub mod agent;
pub mod betting_round;
pub mod errors;
pub mod game_state;
pub mod historian;
pub mod sim_builder;
pub mod simulation;
pub mod tournament;

#[cfg(test)]
pub mod test_util;

pub use agent::Agent;
pub use betting_round::{BettingRound, BettingState};
pub use game_state::{Round, Seat, TableView};
pub use historian::{Historian, HistorianError};
pub use sim_builder::HoldemSimulationBuilder;
pub use simulation::{HandResult, HoldemSimulation, ShowdownHand, SidePot};
