use rand::Rng;
use tracing::{Level, debug_span, event};

use crate::core::{Card, Deck, HandCategory, PokerError, Score, best_hand, score};

use super::{
    action::{
        Action, AgentAction, AwardPayload, DealStartingHandPayload, FailedActionPayload,
        GameStartPayload, PlayedActionPayload,
    },
    betting_round::{BettingRound, BettingState},
    errors::HoldemSimulationError,
    game_state::{Round, Seat, TableView},
    historian::Historian,
};

/// One contender's hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownHand {
    pub idx: usize,
    pub best_five: [Card; 5],
    pub category: HandCategory,
    pub score: Score,
}

/// A slice of the pot between two commitment levels, and who got it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidePot {
    /// The commitment needed to be eligible.
    pub level: u32,
    pub amount: u32,
    pub eligible: Vec<usize>,
    pub winners: Vec<usize>,
}

/// How a hand ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandResult {
    pub pot: u32,
    /// Set when everyone else folded.
    pub winner_by_fold: Option<usize>,
    pub showdown: Vec<ShowdownHand>,
    /// Empty unless the hand went to showdown.
    pub side_pots: Vec<SidePot>,
    /// Chips awarded to each seat.
    pub winnings: Vec<u32>,
}

/// A single hand of no-limit hold'em played by agents.
///
/// Build one with `HoldemSimulationBuilder`, then call `run`. Stacks are
/// carried on the seats so the same seats can be fed into another
/// simulation for the next hand.
pub struct HoldemSimulation {
    pub seats: Vec<Seat>,
    pub board: Vec<Card>,
    pub pot: u32,
    pub round: Round,
    pub min_bet: u32,
    pub big_blind_idx: usize,
    pub(crate) deck: Option<Deck>,
    pub(crate) historians: Vec<Box<dyn Historian>>,
    pub(crate) panic_on_historian_error: bool,
}

impl HoldemSimulation {
    /// Play a whole hand: deal, bet every street, and pay out.
    ///
    /// The rng shuffles the deck unless a deck was given to the builder.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Result<HandResult, HoldemSimulationError> {
        let span = debug_span!("run_hand", big_blind_idx = self.big_blind_idx);
        let _enter = span.enter();

        let starting_chips: u32 = self.seats.iter().map(|s| s.stack).sum();
        let mut deck = self.start(rng)?;

        for street in Round::streets() {
            self.advance_round(street);
            for _ in 0..street.cards_to_deal() {
                let card = deck.deal(1)?[0];
                self.board.push(card);
                self.record_action(Action::DealCommunity(card));
            }

            if self.skip_betting() {
                event!(Level::DEBUG, round = %street, "betting_skipped");
                continue;
            }

            if let Some(winner) = self.run_betting_round(street) {
                let result = self.award_uncontested(winner);
                self.complete(starting_chips, &result);
                return Ok(result);
            }
        }

        self.advance_round(Round::Showdown);
        let result = self.showdown()?;
        self.complete(starting_chips, &result);
        Ok(result)
    }

    /// Number of seats still holding a claim on the pot.
    pub fn num_contenders(&self) -> usize {
        self.seats.iter().filter(|s| s.is_contending()).count()
    }

    fn start<R: Rng>(&mut self, rng: &mut R) -> Result<Deck, HoldemSimulationError> {
        self.round = Round::Starting;
        self.board.clear();
        self.pot = 0;
        for seat in self.seats.iter_mut() {
            seat.reset_for_hand();
        }
        if self.num_contenders() < 2 {
            return Err(HoldemSimulationError::NotEnoughPlayers);
        }

        // The big blind has to be someone dealt in, so slide forward past
        // anyone sitting out.
        let n = self.seats.len();
        if let Some(idx) = (0..n)
            .map(|k| (self.big_blind_idx + k) % n)
            .find(|&idx| self.seats[idx].in_hand)
        {
            self.big_blind_idx = idx;
        }

        let mut deck = match self.deck.take() {
            Some(deck) => deck,
            None => Deck::new_shuffled(rng),
        };
        // Every card the hand can need comes out of this deck, so check
        // before any chips go in.
        let dealt_in = self.seats.iter().filter(|s| s.in_hand).count();
        let needed = 2 * dealt_in + Round::BOARD_CARDS;
        if deck.len() < needed {
            return Err(PokerError::InsufficientCards {
                needed,
                available: deck.len(),
            }
            .into());
        }

        self.record_action(Action::GameStart(GameStartPayload {
            stacks: self.seats.iter().map(|s| s.stack).collect(),
            min_bet: self.min_bet,
            big_blind_idx: self.big_blind_idx,
        }));

        for idx in 0..n {
            if !self.seats[idx].in_hand {
                continue;
            }
            let cards = deck.deal_hole()?;
            self.seats[idx].hole = Some(cards);
            self.record_action(Action::DealStartingHand(DealStartingHandPayload {
                idx,
                cards,
            }));
        }
        Ok(deck)
    }

    fn advance_round(&mut self, round: Round) {
        event!(Level::DEBUG, from = %self.round, to = %round, pot = self.pot, "advance_round");
        self.round = round;
        self.record_action(Action::RoundAdvance(round));
    }

    fn skip_betting(&self) -> bool {
        let any_all_in = self.seats.iter().any(|s| s.is_contending() && s.all_in);
        let can_act = self.seats.iter().filter(|s| s.can_act()).count();
        any_all_in || can_act < 2
    }

    /// Returns the winner if everyone else folded.
    fn run_betting_round(&mut self, street: Round) -> Option<usize> {
        let mut betting = BettingRound::new(
            street,
            &mut self.seats,
            &mut self.pot,
            self.min_bet,
            self.big_blind_idx,
        );
        for forced in betting.forced_bets().to_vec() {
            self.record_action(Action::ForcedBet(forced));
        }

        loop {
            match betting.state() {
                BettingState::AwaitingAction(idx) => self.play_turn(&mut betting, idx),
                BettingState::StreetComplete => {
                    betting.finish(&mut self.seats);
                    return None;
                }
                BettingState::DecidedByFold(winner) => {
                    betting.finish(&mut self.seats);
                    return Some(winner);
                }
            }
        }
    }

    fn play_turn(&mut self, betting: &mut BettingRound, idx: usize) {
        let num_opponents = self.num_contenders().saturating_sub(1);
        let seat = &mut self.seats[idx];
        let action = match seat.hole {
            Some(hole) => {
                let view = TableView {
                    name: &seat.name,
                    seat_idx: idx,
                    stack: seat.stack,
                    round: betting.round(),
                    community_cards: &self.board,
                    pot: self.pot,
                    current_bet: betting.current_bet(),
                    committed: seat.round_bet,
                    num_opponents,
                    raise_count: betting.raise_count(),
                    raise_limit: betting.raise_limit(),
                    min_bet: betting.min_bet(),
                };
                seat.agent.act(&view, &hole)
            }
            None => AgentAction::Fold,
        };

        let (action, resolved) = match betting.apply(&mut self.seats, &mut self.pot, action) {
            Ok(resolved) => (action, resolved),
            Err(error) => {
                event!(Level::WARN, idx, ?action, %error, "invalid_action");
                self.record_action(Action::FailedAction(FailedActionPayload {
                    idx,
                    action,
                    reason: error.to_string(),
                }));
                match betting.apply(&mut self.seats, &mut self.pot, AgentAction::Fold) {
                    Ok(resolved) => (AgentAction::Fold, resolved),
                    // Folding only fails when nobody is up, nothing to record.
                    Err(_) => return,
                }
            }
        };

        self.record_action(Action::PlayedAction(PlayedActionPayload {
            idx,
            action,
            resolved,
            raise_count: betting.raise_count(),
            stack_after: self.seats[idx].stack,
            pot_after: self.pot,
        }));
    }

    fn award_uncontested(&mut self, winner: usize) -> HandResult {
        let mut result = HandResult {
            pot: self.pot,
            winner_by_fold: Some(winner),
            winnings: vec![0; self.seats.len()],
            ..HandResult::default()
        };
        self.award(winner, self.pot, self.pot, None, &mut result.winnings);
        result
    }

    /// Seat indices starting right after the big blind. Odd chips and ties
    /// in the leftover go in this order.
    fn payout_order(&self) -> Vec<usize> {
        let n = self.seats.len();
        (1..=n).map(|k| (self.big_blind_idx + k) % n).collect()
    }

    fn showdown(&mut self) -> Result<HandResult, HoldemSimulationError> {
        let order: Vec<usize> = self
            .payout_order()
            .into_iter()
            .filter(|&idx| self.seats[idx].is_contending())
            .collect();

        let mut hands = Vec::with_capacity(order.len());
        for &idx in &order {
            let Some(hole) = self.seats[idx].hole else {
                continue;
            };
            let (best_five, category) = best_hand(&hole, &self.board)?;
            hands.push(ShowdownHand {
                idx,
                best_five,
                category,
                score: score(&hole, &self.board)?,
            });
            event!(Level::DEBUG, idx, %category, "showdown_hand");
        }

        let mut result = HandResult {
            pot: self.pot,
            winnings: vec![0; self.seats.len()],
            ..HandResult::default()
        };

        let mut levels: Vec<u32> = hands
            .iter()
            .map(|h| self.seats[h.idx].hand_bet)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut previous = 0;
        let mut awarded = 0;
        for level in levels {
            let amount: u32 = self
                .seats
                .iter()
                .map(|s| s.hand_bet.clamp(previous, level) - previous)
                .sum();
            let eligible: Vec<&ShowdownHand> = hands
                .iter()
                .filter(|h| self.seats[h.idx].hand_bet >= level)
                .collect();
            previous = level;
            if amount == 0 {
                continue;
            }

            let winners = best_of(&eligible);
            self.split(amount, &winners, &hands, &mut result.winnings);
            awarded += amount;
            result.side_pots.push(SidePot {
                level,
                amount,
                eligible: eligible.iter().map(|h| h.idx).collect(),
                winners,
            });
        }

        // Chips above every contender's commitment can only come from seats
        // that folded. They go to the best hand that hasn't won anything yet.
        let leftover = self.pot - awarded;
        if leftover > 0 {
            let unpaid: Vec<&ShowdownHand> = hands
                .iter()
                .filter(|h| result.winnings[h.idx] == 0)
                .collect();
            let everyone: Vec<&ShowdownHand> = hands.iter().collect();
            let winners = if unpaid.is_empty() {
                best_of(&everyone)
            } else {
                best_of(&unpaid)
            };
            if let Some(&winner) = winners.first() {
                let hand = hands.iter().find(|h| h.idx == winner);
                self.award(winner, leftover, leftover, hand, &mut result.winnings);
            }
        }

        result.showdown = hands;
        Ok(result)
    }

    fn split(
        &mut self,
        amount: u32,
        winners: &[usize],
        hands: &[ShowdownHand],
        winnings: &mut [u32],
    ) {
        let num_winners = winners.len() as u32;
        if num_winners == 0 {
            return;
        }
        let share = amount / num_winners;
        let odd = (amount % num_winners) as usize;
        for (i, &idx) in winners.iter().enumerate() {
            let chips = share + u32::from(i < odd);
            let hand = hands.iter().find(|h| h.idx == idx);
            self.award(idx, chips, amount, hand, winnings);
        }
    }

    fn award(
        &mut self,
        idx: usize,
        amount: u32,
        total_pot: u32,
        hand: Option<&ShowdownHand>,
        winnings: &mut [u32],
    ) {
        self.seats[idx].stack += amount;
        winnings[idx] += amount;
        event!(
            Level::INFO,
            idx,
            name = %self.seats[idx].name,
            amount,
            total_pot,
            category = ?hand.map(|h| h.category),
            "pot_awarded"
        );
        self.record_action(Action::Award(AwardPayload {
            idx,
            total_pot,
            award_amount: amount,
            category: hand.map(|h| h.category),
            best_five: hand.map(|h| h.best_five),
        }));
    }

    fn complete(&mut self, starting_chips: u32, result: &HandResult) {
        let committed: u32 = self.seats.iter().map(|s| s.hand_bet).sum();
        let paid: u32 = result.winnings.iter().sum();
        let ending_chips: u32 = self.seats.iter().map(|s| s.stack).sum();
        assert_eq!(self.pot, committed, "pot doesn't match what was bet");
        assert_eq!(self.pot, paid, "pot wasn't paid out exactly");
        assert_eq!(starting_chips, ending_chips, "chips were created or lost");

        self.advance_round(Round::Complete);
    }

    fn record_action(&mut self, action: Action) {
        event!(Level::TRACE, ?action, "record_action");
        let panic_on_error = self.panic_on_historian_error;
        self.historians.retain_mut(|historian| {
            match historian.record_action(action.clone()) {
                Ok(()) => true,
                Err(error) => {
                    if panic_on_error {
                        panic!("Historian failed to record action: {error}");
                    }
                    event!(Level::WARN, ?error, "historian_error");
                    false
                }
            }
        });
    }
}

/// Indices of the strongest hands, keeping the order they came in.
fn best_of(hands: &[&ShowdownHand]) -> Vec<usize> {
    match hands.iter().map(|h| h.score).min() {
        Some(best) => hands
            .iter()
            .filter(|h| h.score == best)
            .map(|h| h.idx)
            .collect(),
        None => vec![],
    }
}
