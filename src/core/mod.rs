//! This is the core module. It exports the cards, the deck and the hand
//! evaluator. Nothing in here knows about betting.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value, cards_from_str};

/// Bit set of cards, used to track which cards are known.
mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// We want to be able to iterate over five card hands.
mod card_iter;
/// Make that functionality public.
pub use self::card_iter::CardIter;

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

mod error;
pub use self::error::PokerError;

/// 5 Card hand ranking code.
mod rank;
/// Export the trait and the results.
pub use self::rank::{
    HandCategory, Rank, Rankable, Score, best_five, best_hand, category, score,
};
