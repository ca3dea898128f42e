use crate::core::Deck;

use super::{
    Agent, HoldemSimulation,
    errors::HoldemSimulationError,
    game_state::{Round, Seat},
    historian::Historian,
};

/// Most seats one deck can cover: two hole cards each plus a full board.
pub const MAX_SEATS: usize = (52 - Round::BOARD_CARDS) / 2;

/// # HoldemSimulationBuilder
///
/// `HoldemSimulationBuilder` is a builder to allow for complex
/// configurations of a single hand played via agents. Either agents and
/// stacks, or ready made seats, are required. Everything else is optional.
///
/// ## Setters
///
/// Each setter will set the optional value to the passed in value. Then
/// return the mutated builder.
///
/// ## Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use holdem_bots::arena::{Agent, HoldemSimulationBuilder};
/// use holdem_bots::arena::agent::{CallingAgent, FoldingAgent};
///
/// let agents: Vec<Box<dyn Agent>> = vec![
///     Box::<CallingAgent>::default(),
///     Box::<FoldingAgent>::default(),
/// ];
/// let mut sim = HoldemSimulationBuilder::default()
///     .agents(agents)
///     .stacks(vec![100, 100])
///     .min_bet(10)
///     .build()
///     .unwrap();
///
/// let mut rng = StdRng::seed_from_u64(420);
/// let result = sim.run(&mut rng).unwrap();
/// assert_eq!(200, sim.seats.iter().map(|s| s.stack).sum::<u32>());
/// assert_eq!(result.pot, result.winnings.iter().sum::<u32>());
/// ```
pub struct HoldemSimulationBuilder {
    agents: Option<Vec<Box<dyn Agent>>>,
    names: Option<Vec<String>>,
    stacks: Option<Vec<u32>>,
    seats: Option<Vec<Seat>>,
    min_bet: u32,
    big_blind_idx: usize,
    deck: Option<Deck>,
    historians: Vec<Box<dyn Historian>>,
    panic_on_historian_error: bool,
}

impl HoldemSimulationBuilder {
    pub fn agents(mut self, agents: Vec<Box<dyn Agent>>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Names for the seats. Defaults to `Bot 0`, `Bot 1`, ...
    pub fn names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn stacks(mut self, stacks: Vec<u32>) -> Self {
        self.stacks = Some(stacks);
        self
    }

    /// Use seats that already exist, for example the ones left over from
    /// the last hand. Takes the place of agents, names and stacks.
    pub fn seats(mut self, seats: Vec<Seat>) -> Self {
        self.seats = Some(seats);
        self
    }

    pub fn min_bet(mut self, min_bet: u32) -> Self {
        self.min_bet = min_bet;
        self
    }

    pub fn big_blind_idx(mut self, big_blind_idx: usize) -> Self {
        self.big_blind_idx = big_blind_idx;
        self
    }

    /// Deal from this deck instead of a freshly shuffled one.
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    /// Panic instead of dropping a historian that fails to record.
    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    /// Given the fields already specified build the simulation.
    ///
    /// The simulation needs at least two seats with chips, no more than
    /// `MAX_SEATS` seats, and a minimum bet above zero.
    pub fn build(self) -> Result<HoldemSimulation, HoldemSimulationError> {
        let seats = match self.seats {
            Some(seats) => seats,
            None => build_seats(self.agents, self.names, self.stacks)?,
        };

        if seats.len() > MAX_SEATS {
            return Err(HoldemSimulationError::TooManyPlayers {
                players: seats.len(),
                max: MAX_SEATS,
            });
        }
        if self.min_bet == 0 {
            return Err(HoldemSimulationError::ZeroMinimumBet);
        }
        if seats.iter().filter(|s| s.stack > 0).count() < 2 {
            return Err(HoldemSimulationError::NotEnoughPlayers);
        }

        let big_blind_idx = self.big_blind_idx % seats.len();
        Ok(HoldemSimulation {
            seats,
            board: Vec::with_capacity(5),
            pot: 0,
            round: Round::Starting,
            min_bet: self.min_bet,
            big_blind_idx,
            deck: self.deck,
            historians: self.historians,
            panic_on_historian_error: self.panic_on_historian_error,
        })
    }
}

pub(crate) fn build_seats(
    agents: Option<Vec<Box<dyn Agent>>>,
    names: Option<Vec<String>>,
    stacks: Option<Vec<u32>>,
) -> Result<Vec<Seat>, HoldemSimulationError> {
    let agents = agents.ok_or(HoldemSimulationError::NeedAgents)?;
    let stacks = stacks.ok_or(HoldemSimulationError::NeedStacks)?;
    if agents.len() != stacks.len() {
        return Err(HoldemSimulationError::AgentStackMismatch {
            agents: agents.len(),
            stacks: stacks.len(),
        });
    }
    if agents.len() > MAX_SEATS {
        return Err(HoldemSimulationError::TooManyPlayers {
            players: agents.len(),
            max: MAX_SEATS,
        });
    }
    let names = match names {
        Some(names) if names.len() != agents.len() => {
            return Err(HoldemSimulationError::NameMismatch {
                names: names.len(),
                agents: agents.len(),
            });
        }
        Some(names) => names,
        None => (0..agents.len()).map(|i| format!("Bot {i}")).collect(),
    };

    Ok(agents
        .into_iter()
        .zip(names)
        .zip(stacks)
        .map(|((agent, name), stack)| Seat::new(name, agent, stack))
        .collect())
}

impl Default for HoldemSimulationBuilder {
    fn default() -> Self {
        Self {
            agents: None,
            names: None,
            stacks: None,
            seats: None,
            min_bet: 10,
            big_blind_idx: 0,
            deck: None,
            historians: vec![],
            panic_on_historian_error: false,
        }
    }
}
