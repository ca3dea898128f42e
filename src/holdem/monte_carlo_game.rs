use rand::Rng;
use tracing::{event, trace_span};

use crate::core::{Card, CardBitSet, Deck, PokerError, score};

use super::starting_hand::preflop_strength;

/// How many trials the bots run unless told otherwise.
pub const DEFAULT_TRIALS: usize = 1_000;

/// What an estimate is worth when there is nothing to estimate from.
pub const NO_INFORMATION_EQUITY: f64 = 0.5;

/// The state needed to play out the rest of a hand against one unknown
/// opponent many times over.
#[derive(Debug)]
pub struct MonteCarloGame {
    hole: [Card; 2],
    board: Vec<Card>,
    // Every card that isn't already known, in a fixed order.
    remaining: Deck,
}

impl MonteCarloGame {
    /// Set up a game from what this player can see.
    ///
    /// Fails if the board is too big or any card shows up twice.
    pub fn new(hole: [Card; 2], community: &[Card]) -> Result<Self, PokerError> {
        if community.len() > 5 {
            return Err(PokerError::TooManyCommunityCards(community.len()));
        }
        let known: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
        let known = CardBitSet::from_distinct(&known)?;

        Ok(Self {
            hole,
            board: community.to_vec(),
            remaining: Deck::without(&known),
        })
    }

    /// Finish the board, deal an opponent two cards and return true if
    /// our hand was strictly better.
    pub fn simulate<R: Rng>(&self, rng: &mut R) -> Result<bool, PokerError> {
        let mut deck = self.remaining.clone();
        deck.shuffle(rng);

        let mut board = self.board.clone();
        board.extend(deck.deal(5 - self.board.len())?);
        let opponent = deck.deal(2)?;

        let ours = score(&self.hole, &board)?;
        let theirs = score(&opponent, &board)?;
        Ok(ours.beats(&theirs))
    }

    /// Run `trials` simulations and return the fraction won.
    ///
    /// Zero trials carries no information so that is `NO_INFORMATION_EQUITY`.
    pub fn estimate_equity<R: Rng>(&self, trials: usize, rng: &mut R) -> Result<f64, PokerError> {
        if trials == 0 {
            return Ok(NO_INFORMATION_EQUITY);
        }
        let mut wins = 0;
        for _ in 0..trials {
            if self.simulate(rng)? {
                wins += 1;
            }
        }
        Ok(wins as f64 / trials as f64)
    }
}

/// Shrink an estimate made against one opponent when facing more.
///
/// One (or no) opponent leaves it alone, every extra opponent takes off
/// ten percent, never going below half.
pub fn opponent_adjustment(num_opponents: usize) -> f64 {
    if num_opponents <= 1 {
        1.0
    } else {
        (1.0 - 0.1 * (num_opponents - 1) as f64).max(0.5)
    }
}

/// Estimate the chance that `hole` wins given the community cards so far.
///
/// Pre-flop this is the canned starting hand table. After that it's a
/// monte carlo estimate against one random hand, scaled down by
/// `opponent_adjustment` and clamped to `[0, 1]`.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use holdem_bots::core::cards_from_str;
/// use holdem_bots::holdem::estimate_win_probability;
///
/// let mut rng = StdRng::seed_from_u64(420);
/// let hole = cards_from_str("AsKs").unwrap();
/// let board = cards_from_str("QsJsTs").unwrap();
/// let p = estimate_win_probability([hole[0], hole[1]], &board, 1, 100, &mut rng).unwrap();
/// assert_eq!(1.0, p);
/// ```
pub fn estimate_win_probability<R: Rng>(
    hole: [Card; 2],
    community: &[Card],
    num_opponents: usize,
    trials: usize,
    rng: &mut R,
) -> Result<f64, PokerError> {
    if community.is_empty() {
        return Ok(preflop_strength(&hole));
    }
    if trials == 0 {
        return Ok(NO_INFORMATION_EQUITY);
    }
    let span = trace_span!("estimate_win_probability", trials, num_opponents);
    let _enter = span.enter();

    let game = MonteCarloGame::new(hole, community)?;
    let raw = game.estimate_equity(trials, rng)?;
    let adjusted = (raw * opponent_adjustment(num_opponents)).clamp(0.0, 1.0);

    event!(tracing::Level::TRACE, raw, adjusted, "estimated equity");
    Ok(adjusted)
}
