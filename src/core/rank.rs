use std::fmt;

use super::{Card, CardBitSet, CardIter, PokerError, Value};

/// All the different possible hand ranks.
/// For each hand rank the u32 corresponds to
/// the strength of the hand in comparison to others
/// of the same rank.
///
/// The payload packs the values that matter, most important first, four
/// bits per value. So a pair of nines with A, T, 8 kickers is
/// `0x7_C86`. Derived ordering then does the rest.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// The lowest rank.
    /// No matches
    HighCard(u32),
    /// One Card matches another.
    OnePair(u32),
    /// Two diffent pair of matching cards.
    TwoPair(u32),
    /// Three of the same value.
    ThreeOfAKind(u32),
    /// Five cards in a sequence. The payload is the top card.
    Straight(u32),
    /// Five cards of the same suit
    Flush(u32),
    /// Three of one value and two of another value
    FullHouse(u32),
    /// Four of the same value.
    FourOfAKind(u32),
    /// Five cards in a sequence all fo the same suit.
    StraightFlush(u32),
}

// Payloads use at most five nibbles.
const PAYLOAD_BITS: u32 = 20;

/// The strongest possible hand, an ace high straight flush.
const ROYAL_STRENGTH: u32 = (8 << PAYLOAD_BITS) | Value::Ace as u32;

impl Rank {
    fn class_and_payload(&self) -> (u32, u32) {
        match *self {
            Rank::HighCard(p) => (0, p),
            Rank::OnePair(p) => (1, p),
            Rank::TwoPair(p) => (2, p),
            Rank::ThreeOfAKind(p) => (3, p),
            Rank::Straight(p) => (4, p),
            Rank::Flush(p) => (5, p),
            Rank::FullHouse(p) => (6, p),
            Rank::FourOfAKind(p) => (7, p),
            Rank::StraightFlush(p) => (8, p),
        }
    }

    /// Higher is better, preserves the `Ord` of `Rank`.
    fn strength(&self) -> u32 {
        let (class, payload) = self.class_and_payload();
        debug_assert!(payload < (1 << PAYLOAD_BITS));
        (class << PAYLOAD_BITS) | payload
    }

    /// Convert into the lower is better `Score`.
    pub fn score(&self) -> Score {
        Score(ROYAL_STRENGTH - self.strength())
    }

    pub fn category(&self) -> HandCategory {
        match *self {
            Rank::HighCard(_) => HandCategory::HighCard,
            Rank::OnePair(_) => HandCategory::OnePair,
            Rank::TwoPair(_) => HandCategory::TwoPair,
            Rank::ThreeOfAKind(_) => HandCategory::ThreeOfAKind,
            Rank::Straight(_) => HandCategory::Straight,
            Rank::Flush(_) => HandCategory::Flush,
            Rank::FullHouse(_) => HandCategory::FullHouse,
            Rank::FourOfAKind(_) => HandCategory::FourOfAKind,
            Rank::StraightFlush(high) if high == Value::Ace as u32 => HandCategory::RoyalFlush,
            Rank::StraightFlush(_) => HandCategory::StraightFlush,
        }
    }
}

/// The ordinal strength of a hand. Lower is stronger.
///
/// `Score::BEST` is a royal flush. Two scores compare the same way the
/// hands they came from do, so `a < b` means `a` wins.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score(pub u32);

impl Score {
    pub const BEST: Score = Score(0);

    /// Is this hand stronger than the other one?
    pub fn beats(&self, other: &Score) -> bool {
        self < other
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ten canonical hand categories, weakest first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bit pattern of A2345 using the card values.
const WHEEL: u32 = 1 << (Value::Ace as u32)
    | 1 << (Value::Two as u32)
    | 1 << (Value::Three as u32)
    | 1 << (Value::Four as u32)
    | 1 << (Value::Five as u32);

/// Can this turn into a hand rank?
pub trait Rankable {
    /// Rank the cards. With more than five cards this is the best rank of
    /// any five of them.
    fn rank(&self) -> Rank;

    /// If the five unique values in `value_set` are a straight return the
    /// top card of the straight.
    fn rank_straight(&self, value_set: u32) -> Option<u32> {
        if value_set == WHEEL {
            return Some(Value::Five as u32);
        }
        let low = value_set.trailing_zeros();
        if value_set >> low == 0b11111 {
            Some(low + 4)
        } else {
            None
        }
    }

    /// Rank at most five cards directly.
    fn rank_five(&self, cards: &[Card]) -> Rank {
        debug_assert!(cards.len() <= 5);
        if cards.is_empty() {
            return Rank::HighCard(0);
        }
        let mut counts = [0u8; 13];
        let mut value_set: u32 = 0;
        let mut suit_set: u32 = 0;
        for c in cards {
            counts[c.value as usize] += 1;
            value_set |= 1 << (c.value as u32);
            suit_set |= 1 << (c.suit as u32);
        }

        // (count, value) with the biggest groups then the highest values
        // first. At most five groups, so this stays on the stack.
        let mut groups = [(0u8, 0u32); 5];
        let mut len = 0;
        for (value, &count) in counts.iter().enumerate() {
            if count > 0 {
                groups[len] = (count, value as u32);
                len += 1;
            }
        }
        let groups = &mut groups[..len];
        groups.sort_unstable_by(|a, b| b.cmp(a));
        let packed = groups.iter().fold(0, |acc, (_, v)| (acc << 4) | v);

        let is_five = cards.len() == 5;
        let is_flush = is_five && suit_set.count_ones() == 1;
        let straight = if is_five && value_set.count_ones() == 5 {
            self.rank_straight(value_set)
        } else {
            None
        };

        match (straight, is_flush) {
            (Some(high), true) => Rank::StraightFlush(high),
            (Some(high), false) => Rank::Straight(high),
            (None, true) => Rank::Flush(packed),
            (None, false) => match (groups[0].0, groups.get(1).map(|g| g.0)) {
                (4, _) => Rank::FourOfAKind(packed),
                (3, Some(2)) => Rank::FullHouse(packed),
                (3, _) => Rank::ThreeOfAKind(packed),
                (2, Some(2)) => Rank::TwoPair(packed),
                (2, _) => Rank::OnePair(packed),
                _ => Rank::HighCard(packed),
            },
        }
    }
}

impl Rankable for [Card] {
    fn rank(&self) -> Rank {
        let n = self.len();
        if n <= 5 {
            return self.rank_five(self);
        }
        // Walk every 5 card index combination in place.
        let mut idx = [0, 1, 2, 3, 4];
        let mut best = Rank::HighCard(0);
        loop {
            best = best.max(self.rank_five(&idx.map(|i| self[i])));
            let Some(k) = (0..5).rev().find(|&k| idx[k] < n - 5 + k) else {
                return best;
            };
            idx[k] += 1;
            for j in k + 1..5 {
                idx[j] = idx[j - 1] + 1;
            }
        }
    }
}

impl Rankable for Vec<Card> {
    fn rank(&self) -> Rank {
        self.as_slice().rank()
    }
}

fn combine(hole: &[Card], community: &[Card]) -> Result<Vec<Card>, PokerError> {
    let all: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
    if all.len() < 5 {
        return Err(PokerError::InsufficientCards {
            needed: 5,
            available: all.len(),
        });
    }
    CardBitSet::from_distinct(&all)?;
    Ok(all)
}

/// Score the best five card hand that can be made from the hole cards and
/// the community cards.
///
/// ```
/// use holdem_bots::core::{PokerError, Score, cards_from_str, score};
///
/// let hole = cards_from_str("AsKs").unwrap();
/// let board = cards_from_str("QsJsTs").unwrap();
/// assert_eq!(Score::BEST, score(&hole, &board).unwrap());
///
/// assert!(matches!(
///     score(&hole, &board[..2]),
///     Err(PokerError::InsufficientCards { .. })
/// ));
/// ```
pub fn score(hole: &[Card], community: &[Card]) -> Result<Score, PokerError> {
    let all = combine(hole, community)?;
    Ok(all.rank().score())
}

/// Find the five cards with the lowest score out of `cards`.
///
/// Every 5 card subset is tried in a fixed order, when two subsets tie the
/// first one found is kept.
pub fn best_five(cards: &[Card]) -> Result<[Card; 5], PokerError> {
    if cards.len() < 5 {
        return Err(PokerError::InsufficientCards {
            needed: 5,
            available: cards.len(),
        });
    }
    let mut best: Option<(Score, Vec<Card>)> = None;
    for five in CardIter::new(cards, 5) {
        let s = five.rank().score();
        match &best {
            Some((best_score, _)) if !s.beats(best_score) => {}
            _ => best = Some((s, five)),
        }
    }
    let (_, five) = best.ok_or(PokerError::InsufficientCards {
        needed: 5,
        available: cards.len(),
    })?;
    Ok([five[0], five[1], five[2], five[3], five[4]])
}

/// Which of the ten categories a five card hand falls in.
pub fn category(five: &[Card]) -> HandCategory {
    five.rank().category()
}

/// The best five cards and the category they make.
pub fn best_hand(
    hole: &[Card],
    community: &[Card],
) -> Result<([Card; 5], HandCategory), PokerError> {
    let all = combine(hole, community)?;
    let five = best_five(&all)?;
    Ok((five, category(&five)))
}
