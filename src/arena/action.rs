use crate::core::{Card, HandCategory};

use super::game_state::Round;

/// What a bot asks to do when it's their turn.
///
/// Amounts are clamped by the betting round, never trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentAction {
    /// Give up the hand.
    Fold,
    /// Put in nothing. Only valid when nothing is owed.
    Check,
    /// Match the current bet, or as much of it as the stack allows.
    Call,
    /// Call and then raise by this many more chips.
    Raise(u32),
    /// Push the whole stack in.
    AllIn,
}

/// What actually happened after the betting round applied the
/// `AgentAction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolvedAction {
    Fold,
    Check,
    /// The chips put in to call.
    Call(u32),
    /// Chips put in and the new bet to call.
    Raise { put_in: u32, to: u32 },
    /// Chips put in and the total committed this round afterwards.
    AllIn { put_in: u32, to: u32 },
}

impl ResolvedAction {
    /// How many chips moved from the stack to the pot.
    pub fn chips(&self) -> u32 {
        match *self {
            ResolvedAction::Fold | ResolvedAction::Check => 0,
            ResolvedAction::Call(put_in) => put_in,
            ResolvedAction::Raise { put_in, .. } | ResolvedAction::AllIn { put_in, .. } => put_in,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStartPayload {
    pub stacks: Vec<u32>,
    pub min_bet: u32,
    pub big_blind_idx: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealStartingHandPayload {
    pub idx: usize,
    pub cards: [Card; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForcedBetType {
    SmallBlind,
    BigBlind,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForcedBetPayload {
    pub idx: usize,
    /// The chips actually posted, capped at the stack.
    pub bet: u32,
    pub forced_bet_type: ForcedBetType,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayedActionPayload {
    pub idx: usize,
    pub action: AgentAction,
    pub resolved: ResolvedAction,
    pub raise_count: u8,
    pub stack_after: u32,
    pub pot_after: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailedActionPayload {
    pub idx: usize,
    pub action: AgentAction,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwardPayload {
    pub idx: usize,
    /// The size of the pot (or side pot) this award came out of.
    pub total_pot: u32,
    pub award_amount: u32,
    /// Set when the pot went to showdown.
    pub category: Option<HandCategory>,
    pub best_five: Option<[Card; 5]>,
}

/// Everything observable that happens during a hand. These are handed to
/// every `Historian`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    GameStart(GameStartPayload),
    DealStartingHand(DealStartingHandPayload),
    ForcedBet(ForcedBetPayload),
    PlayedAction(PlayedActionPayload),
    FailedAction(FailedActionPayload),
    DealCommunity(Card),
    RoundAdvance(Round),
    Award(AwardPayload),
}
