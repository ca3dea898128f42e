use core::fmt;

use crate::core::Card;

use super::agent::Agent;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Round {
    Starting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

impl Round {
    /// Community cards on a complete board.
    pub const BOARD_CARDS: usize = 5;

    pub fn advance(&self) -> Self {
        match *self {
            Round::Starting => Round::Preflop,
            Round::Preflop => Round::Flop,
            Round::Flop => Round::Turn,
            Round::Turn => Round::River,
            Round::River => Round::Showdown,
            Round::Showdown => Round::Complete,
            Round::Complete => Round::Complete,
        }
    }

    /// The four streets that have betting, in order.
    pub fn streets() -> [Round; 4] {
        [Round::Preflop, Round::Flop, Round::Turn, Round::River]
    }

    /// How many voluntary raises are allowed on this street.
    pub fn raise_limit(&self) -> u8 {
        match *self {
            Round::Preflop => 3,
            Round::Flop => 2,
            Round::Turn | Round::River => 1,
            _ => 0,
        }
    }

    /// How many community cards get dealt when this street starts.
    pub fn cards_to_deal(&self) -> usize {
        match *self {
            Round::Flop => 3,
            Round::Turn | Round::River => 1,
            _ => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Round::Starting => "Starting",
            Round::Preflop => "Pre-flop",
            Round::Flop => "Flop",
            Round::Turn => "Turn",
            Round::River => "River",
            Round::Showdown => "Showdown",
            Round::Complete => "Complete",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A bot sitting at the table, together with everything the table tracks
/// for them.
///
/// Stacks persist from hand to hand, everything else is reset when a new
/// hand starts.
pub struct Seat {
    pub name: String,
    pub agent: Box<dyn Agent>,
    pub stack: u32,
    /// Chips put in on the current street.
    pub round_bet: u32,
    /// Chips put in over the whole hand.
    pub hand_bet: u32,
    pub hole: Option<[Card; 2]>,
    /// Dealt into the current hand. Seats with no chips sit out.
    pub in_hand: bool,
    pub folded: bool,
    pub all_in: bool,
}

impl Seat {
    pub fn new(name: impl Into<String>, agent: Box<dyn Agent>, stack: u32) -> Self {
        Self {
            name: name.into(),
            agent,
            stack,
            round_bet: 0,
            hand_bet: 0,
            hole: None,
            in_hand: false,
            folded: false,
            all_in: false,
        }
    }

    /// Clear out everything from the last hand. A seat is only dealt in if
    /// they have chips.
    pub fn reset_for_hand(&mut self) {
        self.round_bet = 0;
        self.hand_bet = 0;
        self.hole = None;
        self.in_hand = self.stack > 0;
        self.folded = false;
        self.all_in = false;
    }

    /// Still has a claim on the pot.
    pub fn is_contending(&self) -> bool {
        self.in_hand && !self.folded
    }

    /// Still has decisions to make.
    pub fn can_act(&self) -> bool {
        self.is_contending() && !self.all_in && self.stack > 0
    }

    /// Move up to `amount` chips from the stack into the pot. Returns how
    /// many actually moved.
    pub fn bet(&mut self, amount: u32) -> u32 {
        let put_in = amount.min(self.stack);
        self.stack -= put_in;
        self.round_bet += put_in;
        self.hand_bet += put_in;
        if self.stack == 0 && self.in_hand {
            self.all_in = true;
        }
        put_in
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }
}

impl fmt::Debug for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seat")
            .field("name", &self.name)
            .field("stack", &self.stack)
            .field("round_bet", &self.round_bet)
            .field("hand_bet", &self.hand_bet)
            .field("hole", &self.hole)
            .field("in_hand", &self.in_hand)
            .field("folded", &self.folded)
            .field("all_in", &self.all_in)
            .finish()
    }
}

/// The read-only snapshot of the table handed to a bot when it's their
/// turn.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    pub name: &'a str,
    pub seat_idx: usize,
    pub stack: u32,
    pub round: Round,
    pub community_cards: &'a [Card],
    pub pot: u32,
    /// The amount everyone has to have put in this street.
    pub current_bet: u32,
    /// What this seat has already put in this street.
    pub committed: u32,
    pub num_opponents: usize,
    pub raise_count: u8,
    pub raise_limit: u8,
    pub min_bet: u32,
}

impl TableView<'_> {
    /// Chips needed to call, never more than the stack.
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.committed).min(self.stack)
    }

    pub fn can_check(&self) -> bool {
        self.current_bet <= self.committed
    }

    pub fn can_raise(&self) -> bool {
        self.raise_count < self.raise_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::agent::CallingAgent;

    #[test]
    fn test_round_advance() {
        let mut round = Round::Starting;
        let mut seen = vec![round];
        while round != Round::Complete {
            round = round.advance();
            seen.push(round);
        }
        assert_eq!(7, seen.len());
        assert_eq!(Round::Complete, Round::Complete.advance());
    }

    #[test]
    fn test_street_limits() {
        let limits: Vec<u8> = Round::streets().iter().map(|r| r.raise_limit()).collect();
        assert_eq!(vec![3, 2, 1, 1], limits);

        let cards: usize = Round::streets().iter().map(|r| r.cards_to_deal()).sum();
        assert_eq!(5, cards);
        assert_eq!("Pre-flop", Round::Preflop.to_string());
    }

    #[test]
    fn test_bet_caps_at_stack() {
        let mut seat = Seat::new("short", Box::<CallingAgent>::default(), 25);
        seat.reset_for_hand();

        assert_eq!(10, seat.bet(10));
        assert!(!seat.all_in);
        assert_eq!(15, seat.bet(100));
        assert_eq!(0, seat.stack);
        assert_eq!(25, seat.round_bet);
        assert_eq!(25, seat.hand_bet);
        assert!(seat.all_in);
        assert!(seat.is_contending());
        assert!(!seat.can_act());
    }

    #[test]
    fn test_busted_seat_sits_out() {
        let mut seat = Seat::new("busted", Box::<CallingAgent>::default(), 0);
        seat.reset_for_hand();
        assert!(!seat.in_hand);
        assert!(!seat.is_contending());
        assert!(!seat.can_act());
    }

    #[test]
    fn test_view_to_call() {
        let view = TableView {
            name: "a",
            seat_idx: 0,
            stack: 5,
            round: Round::Flop,
            community_cards: &[],
            pot: 40,
            current_bet: 20,
            committed: 10,
            num_opponents: 1,
            raise_count: 2,
            raise_limit: 2,
            min_bet: 10,
        };
        assert_eq!(5, view.to_call());
        assert!(!view.can_check());
        assert!(!view.can_raise());
    }
}
