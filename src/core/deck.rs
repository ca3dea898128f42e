use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, CardBitSet, PokerError, Suit, Value};

/// `Deck` is the 52 card deck that a hand is dealt from.
///
/// Cards are dealt off the end of the deck and never come back, a new
/// deck is built for every hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    /// Card storage.
    cards: Vec<Card>,
}

impl Deck {
    /// Create the full 52 card deck in a fixed order.
    ///
    /// ```
    /// use holdem_bots::core::Deck;
    ///
    /// assert_eq!(52, Deck::new().len());
    /// ```
    pub fn new() -> Self {
        let cards = Suit::suits()
            .iter()
            .flat_map(|s| Value::values().map(|v| Card::new(v, *s)))
            .collect();
        Self { cards }
    }

    /// Create a full deck then shuffle it with the given rng.
    pub fn new_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// A deck holding every card that isn't in `known`.
    ///
    /// Cards keep the fixed deck order so that the same known cards and
    /// the same rng always produce the same deal.
    pub fn without(known: &CardBitSet) -> Self {
        let cards = Self::new()
            .cards
            .into_iter()
            .filter(|c| !known.contains(*c))
            .collect();
        Self { cards }
    }

    /// Randomly shuffle the deck.
    /// The same seeded rng gives the same order.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng)
    }

    /// Remove `n` cards from the deck and return them.
    ///
    /// When there aren't enough cards nothing is dealt.
    ///
    /// ```
    /// use holdem_bots::core::{Deck, PokerError};
    ///
    /// let mut deck = Deck::new();
    /// assert_eq!(3, deck.deal(3).unwrap().len());
    /// assert_eq!(49, deck.len());
    ///
    /// assert_eq!(
    ///     Err(PokerError::InsufficientCards { needed: 50, available: 49 }),
    ///     deck.deal(50)
    /// );
    /// assert_eq!(49, deck.len());
    /// ```
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, PokerError> {
        if n > self.cards.len() {
            return Err(PokerError::InsufficientCards {
                needed: n,
                available: self.cards.len(),
            });
        }
        let split = self.cards.len() - n;
        let mut dealt = self.cards.split_off(split);
        // Keep the order the cards would come off the top.
        dealt.reverse();
        Ok(dealt)
    }

    /// Deal exactly two cards as a starting hand.
    pub fn deal_hole(&mut self) -> Result<[Card; 2], PokerError> {
        let cards = self.deal(2)?;
        Ok([cards[0], cards[1]])
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards still in the deck. The last card is dealt first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Card>> for Deck {
    /// Build a stacked deck. The last card in the vec is dealt first.
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
