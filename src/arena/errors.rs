use thiserror::Error;

use crate::core::PokerError;

/// Reasons a bot's response can't be applied. The betting round treats
/// every one of these as a fold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Can't check with {to_call} chips to call")]
    CheckFacingBet { to_call: u32 },
    #[error("A raise has to be for more than zero chips")]
    ZeroRaise,
    #[error("The betting round isn't waiting on an action")]
    NotAwaitingAction,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HoldemSimulationError {
    #[error("Builder needs agents")]
    NeedAgents,
    #[error("Builder needs stacks")]
    NeedStacks,
    #[error("Got {agents} agents but {stacks} stacks")]
    AgentStackMismatch { agents: usize, stacks: usize },
    #[error("Got {names} names for {agents} agents")]
    NameMismatch { names: usize, agents: usize },
    #[error("{players} players is more than one deck can deal to, the limit is {max}")]
    TooManyPlayers { players: usize, max: usize },
    #[error("At least two players with chips are needed")]
    NotEnoughPlayers,
    #[error("The minimum bet must be more than zero")]
    ZeroMinimumBet,
    #[error("Card error: {0}")]
    Deal(#[from] PokerError),
}
