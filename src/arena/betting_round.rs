use tracing::{Level, event};

use super::{
    action::{AgentAction, ForcedBetPayload, ForcedBetType, ResolvedAction},
    errors::ActionError,
    game_state::{Round, Seat},
};

/// Where a street's betting stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BettingState {
    /// Waiting on this seat.
    AwaitingAction(usize),
    /// Nobody owes an action, deal the next street.
    StreetComplete,
    /// Everyone else folded and this seat takes the pot.
    DecidedByFold(usize),
}

/// The betting for a single street.
///
/// Turn order starts with the seat after the big blind and wraps around.
/// Each seat that can still act owes an action; a raise makes everyone
/// else who can act owe one again. The street is over once nobody owes
/// anything, or there's only one seat left contending.
///
/// Seats and the pot are owned by the caller and passed in, so this is
/// only the bookkeeping for whose turn it is and what's been bet.
#[derive(Debug, Clone)]
pub struct BettingRound {
    round: Round,
    min_bet: u32,
    current_bet: u32,
    raise_count: u8,
    raise_limit: u8,
    // Seat indices in turn order, only those contending at the start.
    order: Vec<usize>,
    // Indexed by seat, not by position in `order`.
    needs_action: Vec<bool>,
    cursor: usize,
    forced_bets: Vec<ForcedBetPayload>,
    state: BettingState,
}

impl BettingRound {
    /// Start the betting for `round`.
    ///
    /// Pre-flop this posts the blinds: half the minimum bet from the seat
    /// before the big blind and the minimum bet from the big blind, each
    /// capped at their stack. The bet to call starts at the minimum bet
    /// pre-flop and at zero on every later street.
    ///
    /// `big_blind_idx` has to be a contending seat.
    pub fn new(
        round: Round,
        seats: &mut [Seat],
        pot: &mut u32,
        min_bet: u32,
        big_blind_idx: usize,
    ) -> Self {
        let num_seats = seats.len();
        let order: Vec<usize> = (1..=num_seats)
            .map(|k| (big_blind_idx + k) % num_seats)
            .filter(|&idx| seats[idx].is_contending())
            .collect();

        let mut betting = Self {
            round,
            min_bet,
            current_bet: 0,
            raise_count: 0,
            raise_limit: round.raise_limit(),
            cursor: order.len().saturating_sub(1),
            order,
            needs_action: vec![false; num_seats],
            forced_bets: vec![],
            state: BettingState::StreetComplete,
        };

        if round == Round::Preflop {
            betting.post_blinds(seats, pot);
        }
        betting.open_action(seats);
        betting
    }

    fn post_blinds(&mut self, seats: &mut [Seat], pot: &mut u32) {
        let active = self.order.iter().filter(|&&idx| seats[idx].can_act()).count();
        if active < 2 {
            return;
        }
        let n = self.order.len();
        let big_blind = self.order[n - 1];
        let small_blind = self.order[n - 2];

        for (idx, amount, forced_bet_type) in [
            (small_blind, self.min_bet / 2, ForcedBetType::SmallBlind),
            (big_blind, self.min_bet, ForcedBetType::BigBlind),
        ] {
            let bet = seats[idx].bet(amount);
            *pot += bet;
            event!(Level::DEBUG, idx, bet, ?forced_bet_type, "forced_bet");
            self.forced_bets.push(ForcedBetPayload {
                idx,
                bet,
                forced_bet_type,
            });
        }
        self.current_bet = self.min_bet;
    }

    fn open_action(&mut self, seats: &[Seat]) {
        let can_act = self.order.iter().filter(|&&idx| seats[idx].can_act()).count();
        for &idx in &self.order {
            let seat = &seats[idx];
            // A lone seat that can still act only owes something if it's
            // facing a bet.
            self.needs_action[idx] =
                seat.can_act() && (can_act > 1 || seat.round_bet < self.current_bet);
        }
        self.advance(seats);
    }

    fn advance(&mut self, seats: &[Seat]) {
        let mut contenders = self.order.iter().filter(|&&idx| seats[idx].is_contending());
        if let (Some(&winner), None) = (contenders.next(), contenders.next()) {
            self.state = BettingState::DecidedByFold(winner);
            return;
        }

        let n = self.order.len();
        for step in 1..=n {
            let pos = (self.cursor + step) % n;
            let idx = self.order[pos];
            if self.needs_action[idx] && seats[idx].can_act() {
                self.cursor = pos;
                self.state = BettingState::AwaitingAction(idx);
                return;
            }
        }
        self.state = BettingState::StreetComplete;
    }

    /// Apply what the seat that's up asked to do.
    ///
    /// - A call is capped at the stack. Calling nothing is a check.
    /// - A raise puts in the call plus `max(by, min_bet)`, capped at the
    ///   stack. Once the street's raise cap is reached it's a call instead.
    /// - All in is always allowed and always counts toward the raise cap.
    ///   Action only re-opens when it lifts the bet to call.
    ///
    /// Checking into a bet and raising zero chips are errors and leave
    /// everything untouched. The caller decides what to do about that.
    pub fn apply(
        &mut self,
        seats: &mut [Seat],
        pot: &mut u32,
        action: AgentAction,
    ) -> Result<ResolvedAction, ActionError> {
        let idx = match self.state {
            BettingState::AwaitingAction(idx) => idx,
            _ => return Err(ActionError::NotAwaitingAction),
        };
        let to_call = self.current_bet.saturating_sub(seats[idx].round_bet);

        let resolved = match action {
            AgentAction::Fold => {
                seats[idx].fold();
                ResolvedAction::Fold
            }
            AgentAction::Check if to_call > 0 => {
                return Err(ActionError::CheckFacingBet { to_call });
            }
            AgentAction::Check => ResolvedAction::Check,
            AgentAction::Call => call(&mut seats[idx], pot, to_call),
            AgentAction::Raise(0) => return Err(ActionError::ZeroRaise),
            AgentAction::Raise(_) if self.raise_count >= self.raise_limit => {
                event!(
                    Level::TRACE,
                    idx,
                    raise_count = self.raise_count,
                    "raise_capped"
                );
                call(&mut seats[idx], pot, to_call)
            }
            AgentAction::Raise(by) => {
                let put_in = seats[idx].bet(to_call.saturating_add(by.max(self.min_bet)));
                *pot += put_in;
                let to = seats[idx].round_bet;
                if to > self.current_bet {
                    self.raise_count = self.raise_count.saturating_add(1);
                    self.lift(seats, idx);
                    ResolvedAction::Raise { put_in, to }
                } else if put_in == 0 {
                    ResolvedAction::Check
                } else {
                    // Too short to do more than call.
                    ResolvedAction::Call(put_in)
                }
            }
            AgentAction::AllIn => {
                let stack = seats[idx].stack;
                let put_in = seats[idx].bet(stack);
                *pot += put_in;
                let to = seats[idx].round_bet;
                // Every all-in uses up a raise, even one short of the bet.
                self.raise_count = self.raise_count.saturating_add(1);
                if to > self.current_bet {
                    self.lift(seats, idx);
                }
                ResolvedAction::AllIn { put_in, to }
            }
        };

        event!(
            Level::TRACE,
            idx,
            ?action,
            ?resolved,
            current_bet = self.current_bet,
            raise_count = self.raise_count,
            pot = *pot,
            "action_applied"
        );

        self.needs_action[idx] = false;
        self.advance(seats);
        Ok(resolved)
    }

    fn lift(&mut self, seats: &[Seat], raiser: usize) {
        self.current_bet = seats[raiser].round_bet;
        for &idx in &self.order {
            if idx != raiser && seats[idx].can_act() {
                self.needs_action[idx] = true;
            }
        }
    }

    /// Clear the per-street bets once the street is over.
    pub fn finish(self, seats: &mut [Seat]) {
        for seat in seats.iter_mut() {
            seat.round_bet = 0;
        }
    }

    pub fn state(&self) -> BettingState {
        self.state
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    pub fn raise_count(&self) -> u8 {
        self.raise_count
    }

    pub fn raise_limit(&self) -> u8 {
        self.raise_limit
    }

    pub fn min_bet(&self) -> u32 {
        self.min_bet
    }

    /// The blinds posted when this round started, small blind first.
    pub fn forced_bets(&self) -> &[ForcedBetPayload] {
        &self.forced_bets
    }

    pub fn needs_action(&self, idx: usize) -> bool {
        self.needs_action.get(idx).copied().unwrap_or(false)
    }
}

fn call(seat: &mut Seat, pot: &mut u32, to_call: u32) -> ResolvedAction {
    let put_in = seat.bet(to_call);
    *pot += put_in;
    if put_in == 0 {
        ResolvedAction::Check
    } else {
        ResolvedAction::Call(put_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::agent::FoldingAgent;

    fn seats(stacks: &[u32]) -> Vec<Seat> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &stack)| {
                let mut seat = Seat::new(format!("bot-{i}"), Box::new(FoldingAgent), stack);
                seat.reset_for_hand();
                seat
            })
            .collect()
    }

    #[test]
    fn test_blinds() {
        let mut seats = seats(&[200; 4]);
        let mut pot = 0;
        let betting = BettingRound::new(Round::Preflop, &mut seats, &mut pot, 10, 0);

        assert_eq!(15, pot);
        assert_eq!(10, seats[0].round_bet);
        assert_eq!(5, seats[3].round_bet);
        assert_eq!(195, seats[3].stack);
        assert_eq!(10, betting.current_bet());
        assert_eq!(2, betting.forced_bets().len());
        assert_eq!(ForcedBetType::SmallBlind, betting.forced_bets()[0].forced_bet_type);
        assert_eq!(3, betting.forced_bets()[0].idx);
        // First to act is right after the big blind.
        assert_eq!(BettingState::AwaitingAction(1), betting.state());
    }

    #[test]
    fn test_short_blind_goes_all_in() {
        let mut seats = seats(&[7, 200, 3]);
        let mut pot = 0;
        let betting = BettingRound::new(Round::Preflop, &mut seats, &mut pot, 10, 0);

        assert_eq!(7 + 3, pot);
        assert!(seats[0].all_in);
        assert!(seats[2].all_in);
        assert_eq!(10, betting.current_bet());
        // Only seat 1 can act, and they're facing the big blind.
        assert_eq!(BettingState::AwaitingAction(1), betting.state());
    }

    #[test]
    fn test_postflop_starts_at_zero() {
        let mut seats = seats(&[200; 3]);
        let mut pot = 30;
        let betting = BettingRound::new(Round::Flop, &mut seats, &mut pot, 10, 2);
        assert_eq!(30, pot);
        assert_eq!(0, betting.current_bet());
        assert!(betting.forced_bets().is_empty());
        assert_eq!(BettingState::AwaitingAction(0), betting.state());
    }

    #[test]
    fn test_everyone_folds_to_big_blind() {
        let mut seats = seats(&[200; 4]);
        let mut pot = 0;
        let mut betting = BettingRound::new(Round::Preflop, &mut seats, &mut pot, 10, 0);

        for _ in 0..3 {
            assert_eq!(
                ResolvedAction::Fold,
                betting.apply(&mut seats, &mut pot, AgentAction::Fold).unwrap()
            );
        }
        assert_eq!(BettingState::DecidedByFold(0), betting.state());
        assert_eq!(15, pot);
        assert_eq!(
            Err(ActionError::NotAwaitingAction),
            betting.apply(&mut seats, &mut pot, AgentAction::Call)
        );
    }

    #[test]
    fn test_limp_gives_big_blind_option() {
        let mut seats = seats(&[200; 3]);
        let mut pot = 0;
        let mut betting = BettingRound::new(Round::Preflop, &mut seats, &mut pot, 10, 0);

        // Seat 1 calls 10, seat 2 completes the small blind.
        assert_eq!(
            ResolvedAction::Call(10),
            betting.apply(&mut seats, &mut pot, AgentAction::Call).unwrap()
        );
        assert_eq!(
            ResolvedAction::Call(5),
            betting.apply(&mut seats, &mut pot, AgentAction::Call).unwrap()
        );
        assert_eq!(BettingState::AwaitingAction(0), betting.state());
        assert_eq!(
            ResolvedAction::Check,
            betting.apply(&mut seats, &mut pot, AgentAction::Check).unwrap()
        );
        assert_eq!(BettingState::StreetComplete, betting.state());
        assert_eq!(30, pot);
    }

    #[test]
    fn test_raise_reopens_action() {
        let mut seats = seats(&[200; 3]);
        let mut pot = 0;
        let mut betting = BettingRound::new(Round::Flop, &mut seats, &mut pot, 10, 2);

        betting.apply(&mut seats, &mut pot, AgentAction::Check).unwrap();
        betting.apply(&mut seats, &mut pot, AgentAction::Check).unwrap();
        assert_eq!(BettingState::AwaitingAction(2), betting.state());
        assert_eq!(
            ResolvedAction::Raise { put_in: 25, to: 25 },
            betting.apply(&mut seats, &mut pot, AgentAction::Raise(25)).unwrap()
        );
        assert_eq!(1, betting.raise_count());
        assert!(betting.needs_action(0));
        assert!(betting.needs_action(1));
        assert!(!betting.needs_action(2));
        assert_eq!(BettingState::AwaitingAction(0), betting.state());

        betting.apply(&mut seats, &mut pot, AgentAction::Call).unwrap();
        betting.apply(&mut seats, &mut pot, AgentAction::Fold).unwrap();
        assert_eq!(BettingState::StreetComplete, betting.state());
        assert_eq!(50, pot);
    }

    #[test]
    fn test_raise_below_minimum_is_bumped() {
        let mut seats = seats(&[200; 2]);
        let mut pot = 0;
        let mut betting = BettingRound::new(Round::Turn, &mut seats, &mut pot, 20, 1);
        assert_eq!(
            ResolvedAction::Raise { put_in: 20, to: 20 },
            betting.apply(&mut seats, &mut pot, AgentAction::Raise(1)).unwrap()
        );
    }

    #[test]
    fn test_raise_at_cap_becomes_call() {
        let mut seats = seats(&[1_000; 2]);
        let mut pot = 0;
        let mut betting = BettingRound::new(Round::Flop, &mut seats, &mut pot, 10, 1);

        // Flop allows two raises.
        betting.apply(&mut seats, &mut pot, AgentAction::Raise(10)).unwrap();
        betting.apply(&mut seats, &mut pot, AgentAction::Raise(10)).unwrap();
        assert_eq!(2, betting.raise_count());
        assert_eq!(20, betting.current_bet());

        let resolved = betting
            .apply(&mut seats, &mut pot, AgentAction::Raise(10))
            .unwrap();
        assert_eq!(ResolvedAction::Call(10), resolved);
        assert_eq!(2, betting.raise_count());
        assert_eq!(20, betting.current_bet());
        assert_eq!(BettingState::StreetComplete, betting.state());
    }

    #[test]
    fn test_river_allows_one_raise() {
        let mut seats = seats(&[1_000; 2]);
        let mut pot = 0;
        let mut betting = BettingRound::new(Round::River, &mut seats, &mut pot, 10, 1);
        betting.apply(&mut seats, &mut pot, AgentAction::Raise(10)).unwrap();
        assert_eq!(
            ResolvedAction::Call(10),
            betting.apply(&mut seats, &mut pot, AgentAction::Raise(50)).unwrap()
        );
        assert_eq!(BettingState::StreetComplete, betting.state());
        assert_eq!(1, betting.raise_count());
    }

    #[test]
    fn test_invalid_responses_change_nothing() {
        let mut seats = seats(&[200; 4]);
        let mut pot = 0;
        let mut betting = BettingRound::new(Round::Preflop, &mut seats, &mut pot, 10, 0);

        assert_eq!(
            Err(ActionError::CheckFacingBet { to_call: 10 }),
            betting.apply(&mut seats, &mut pot, AgentAction::Check)
        );
        assert_eq!(
            Err(ActionError::ZeroRaise),
            betting.apply(&mut seats, &mut pot, AgentAction::Raise(0))
        );
        assert_eq!(BettingState::AwaitingAction(1), betting.state());
        assert_eq!(15, pot);
        assert_eq!(200, seats[1].stack);
    }

    #[test]
    fn test_all_in_raise_and_short_all_in() {
        let mut seats = seats(&[200, 50, 300]);
        let mut pot = 0;
        let mut betting = BettingRound::new(Round::Flop, &mut seats, &mut pot, 10, 2);

        // Seat 0 bets 100.
        betting.apply(&mut seats, &mut pot, AgentAction::Raise(100)).unwrap();
        assert_eq!(1, betting.raise_count());

        // Seat 1 is short. The all in uses a raise but doesn't lift the bet.
        assert_eq!(
            ResolvedAction::AllIn { put_in: 50, to: 50 },
            betting.apply(&mut seats, &mut pot, AgentAction::AllIn).unwrap()
        );
        assert_eq!(2, betting.raise_count());
        assert_eq!(100, betting.current_bet());
        assert!(!betting.needs_action(0));

        // Seat 2 shoves over the top.
        assert_eq!(
            ResolvedAction::AllIn {
                put_in: 300,
                to: 300
            },
            betting.apply(&mut seats, &mut pot, AgentAction::AllIn).unwrap()
        );
        assert_eq!(3, betting.raise_count());
        assert_eq!(BettingState::AwaitingAction(0), betting.state());

        // Calling puts seat 0 all in for less.
        assert_eq!(
            ResolvedAction::Call(100),
            betting.apply(&mut seats, &mut pot, AgentAction::Call).unwrap()
        );
        assert!(seats[0].all_in);
        assert_eq!(BettingState::StreetComplete, betting.state());
        assert_eq!(550, pot);
    }

    #[test]
    fn test_short_all_in_uses_up_a_raise() {
        let mut seats = seats(&[200, 50, 300]);
        let mut pot = 0;
        let mut betting = BettingRound::new(Round::Flop, &mut seats, &mut pot, 10, 2);

        betting.apply(&mut seats, &mut pot, AgentAction::Raise(100)).unwrap();
        betting.apply(&mut seats, &mut pot, AgentAction::AllIn).unwrap();
        assert_eq!(2, betting.raise_count());

        // The flop allows two raises, so seat 2 can only call.
        assert_eq!(
            ResolvedAction::Call(100),
            betting.apply(&mut seats, &mut pot, AgentAction::Raise(50)).unwrap()
        );
        assert_eq!(2, betting.raise_count());
        assert_eq!(100, betting.current_bet());
        assert_eq!(BettingState::StreetComplete, betting.state());
        assert_eq!(250, pot);
    }

    #[test]
    fn test_nobody_left_to_act() {
        let mut seats = seats(&[200; 3]);
        seats[0].all_in = true;
        seats[1].all_in = true;
        let mut pot = 0;
        let betting = BettingRound::new(Round::Turn, &mut seats, &mut pot, 10, 2);
        assert_eq!(BettingState::StreetComplete, betting.state());
    }

    #[test]
    fn test_finish_clears_round_bets() {
        let mut seats = seats(&[200; 2]);
        let mut pot = 0;
        let betting = BettingRound::new(Round::Preflop, &mut seats, &mut pot, 10, 0);
        betting.finish(&mut seats);
        assert!(seats.iter().all(|s| s.round_bet == 0));
        assert_eq!(15, seats.iter().map(|s| s.hand_bet).sum::<u32>());
    }
}
