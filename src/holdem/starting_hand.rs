use crate::core::{Card, Value};

/// Strength used for any starting hand that isn't in the table.
pub const DEFAULT_PREFLOP_STRENGTH: f64 = 0.35;

/// Canned pre-flop strengths keyed by the pair of values, higher value
/// first. Suits are not modelled.
const PREFLOP_TABLE: [((Value, Value), f64); 19] = [
    ((Value::Ace, Value::Ace), 0.85),
    ((Value::King, Value::King), 0.82),
    ((Value::Queen, Value::Queen), 0.80),
    ((Value::Jack, Value::Jack), 0.77),
    ((Value::Ace, Value::King), 0.75),
    ((Value::Ten, Value::Ten), 0.73),
    ((Value::Ace, Value::Queen), 0.70),
    ((Value::Ace, Value::Jack), 0.68),
    ((Value::King, Value::Queen), 0.66),
    ((Value::Jack, Value::Ten), 0.64),
    ((Value::Ace, Value::Ten), 0.62),
    ((Value::King, Value::Jack), 0.60),
    ((Value::Queen, Value::Jack), 0.58),
    ((Value::King, Value::Ten), 0.55),
    ((Value::Queen, Value::Ten), 0.52),
    ((Value::Seven, Value::Two), 0.10),
    ((Value::Eight, Value::Three), 0.12),
    ((Value::Nine, Value::Four), 0.14),
    ((Value::Ten, Value::Five), 0.16),
];

/// `StartingHand` is the unordered pair of values in a two card holdem
/// starting hand.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct StartingHand {
    /// The higher (or equal) value.
    pub high: Value,
    /// The lower (or equal) value.
    pub low: Value,
}

impl StartingHand {
    pub fn new(hole: &[Card; 2]) -> Self {
        let (a, b) = (hole[0].value, hole[1].value);
        Self {
            high: a.max(b),
            low: a.min(b),
        }
    }

    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    /// Look up how strong this starting hand is in `[0, 1]`.
    pub fn strength(&self) -> f64 {
        PREFLOP_TABLE
            .iter()
            .find(|(key, _)| *key == (self.high, self.low))
            .map_or(DEFAULT_PREFLOP_STRENGTH, |(_, strength)| *strength)
    }
}

/// Pre-flop strength of two hole cards.
///
/// ```
/// use holdem_bots::core::cards_from_str;
/// use holdem_bots::holdem::preflop_strength;
///
/// let cards = cards_from_str("KhAs").unwrap();
/// assert_eq!(0.75, preflop_strength(&[cards[0], cards[1]]));
/// ```
pub fn preflop_strength(hole: &[Card; 2]) -> f64 {
    StartingHand::new(hole).strength()
}
