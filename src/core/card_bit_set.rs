use std::fmt;

use super::{Card, PokerError};

/// One bit per card, indexed by the card's `u8` encoding.
///
/// Used to track which cards are already out of the deck: the hole cards
/// and board a bot can see, or the cards a test wants on top of the deck.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CardBitSet(u64);

#[inline]
fn bit(card: Card) -> u64 {
    1u64 << u8::from(card)
}

impl CardBitSet {
    /// An empty set.
    ///
    /// ```
    /// use holdem_bots::core::CardBitSet;
    /// assert_eq!(0, CardBitSet::new().count());
    /// ```
    pub fn new() -> Self {
        Self(0)
    }

    /// Collect cards that must all be different.
    ///
    /// ```
    /// use holdem_bots::core::{CardBitSet, PokerError, cards_from_str};
    ///
    /// let cards = cards_from_str("AsKsAs").unwrap();
    /// assert!(matches!(
    ///     CardBitSet::from_distinct(&cards),
    ///     Err(PokerError::DuplicateCard(_))
    /// ));
    /// ```
    pub fn from_distinct(cards: &[Card]) -> Result<Self, PokerError> {
        cards.iter().try_fold(Self::new(), |mut set, &card| {
            if set.insert(card) {
                Ok(set)
            } else {
                Err(PokerError::DuplicateCard(card))
            }
        })
    }

    /// Add a card. Returns false if it was already there.
    pub fn insert(&mut self, card: Card) -> bool {
        let fresh = !self.contains(card);
        self.0 |= bit(card);
        fresh
    }

    pub fn remove(&mut self, card: Card) {
        self.0 &= !bit(card);
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 & bit(card) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }
}

impl fmt::Debug for CardBitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(*self).finish()
    }
}

/// Walks the set from the lowest encoded card up.
pub struct CardBitSetIter(u64);

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardBitSetIter(self.0)
    }
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let low = self.0.trailing_zeros() as u8;
        // Clear the lowest set bit.
        self.0 &= self.0 - 1;
        // Only valid cards are ever inserted.
        Card::try_from(low).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Suit, Value, cards_from_str};

    use super::*;

    #[test]
    fn test_new_is_empty() {
        let known = CardBitSet::new();
        assert!(known.is_empty());
        assert_eq!(None, known.into_iter().next());
    }

    #[test]
    fn test_insert_reports_repeats() {
        let mut known = CardBitSet::new();
        let six = Card::new(Value::Six, Suit::Club);
        assert!(known.insert(six));
        assert!(!known.insert(six));
        assert_eq!(1, known.count());
        known.remove(six);
        assert!(!known.contains(six));
    }

    #[test]
    fn test_iterates_in_encoding_order() {
        let cards = cards_from_str("As2cKd").unwrap();
        let known = CardBitSet::from_distinct(&cards).unwrap();
        let order: Vec<u8> = known.into_iter().map(u8::from).collect();
        let mut expected: Vec<u8> = cards.iter().map(|&c| u8::from(c)).collect();
        expected.sort();
        assert_eq!(expected, order);
    }

    #[test]
    fn test_every_card_fits() {
        let all: Vec<Card> = (0..52u8).map(|idx| Card::try_from(idx).unwrap()).collect();
        let known = CardBitSet::from_distinct(&all).unwrap();
        assert_eq!(52, known.count());
        assert_eq!(52, known.into_iter().count());
    }
}
