use std::fmt;

use super::error::PokerError;

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Take a u8 and convert it to a value. Only 0 through 12 are values.
    ///
    /// ```
    /// use holdem_bots::core::Value;
    ///
    /// assert_eq!(Some(Value::Two), Value::from_u8(0));
    /// assert_eq!(Some(Value::Ace), Value::from_u8(12));
    /// assert_eq!(None, Value::from_u8(13));
    /// ```
    pub fn from_u8(v: u8) -> Option<Self> {
        VALUES.get(v as usize).copied()
    }

    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Given a character parse that char into a value.
    /// Case is ignored as long as the char is in the ascii range.
    ///
    /// ```
    /// use holdem_bots::core::Value;
    ///
    /// assert_eq!(Some(Value::Ten), Value::from_char('T'));
    /// assert_eq!(Some(Value::King), Value::from_char('k'));
    /// assert_eq!(None, Value::from_char('X'));
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    /// Convert this Value to a char.
    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    /// Translate a u8 into a suit. Anything past 3 is `None`.
    pub fn from_u8(s: u8) -> Option<Self> {
        SUITS.get(s as usize).copied()
    }

    /// Given a character that represents a suit try and parse that char.
    ///
    /// ```
    /// use holdem_bots::core::Suit;
    ///
    /// assert_eq!(Some(Suit::Heart), Suit::from_char('h'));
    /// assert_eq!(None, Suit::from_char('x'));
    /// ```
    pub fn from_char(s: char) -> Option<Self> {
        match s.to_ascii_lowercase() {
            'd' => Some(Self::Diamond),
            's' => Some(Self::Spade),
            'h' => Some(Self::Heart),
            'c' => Some(Self::Club),
            _ => None,
        }
    }

    /// This Suit to a character.
    pub fn to_char(self) -> char {
        match self {
            Self::Diamond => 'd',
            Self::Spade => 's',
            Self::Heart => 'h',
            Self::Club => 'c',
        }
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }
}

/// The compact encoding used by the bit sets.
/// `value * 4 + suit` so every card is in `0..52`.
impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        (card.value as u8) * 4 + (card.suit as u8)
    }
}

/// Decode the `u8` form. Only `0..52` are cards.
///
/// ```
/// use holdem_bots::core::{Card, PokerError, Suit, Value};
///
/// assert_eq!(Ok(Card::new(Value::Six, Suit::Club)), Card::try_from(17u8));
/// assert_eq!(Err(PokerError::InvalidCardIndex(52)), Card::try_from(52u8));
/// ```
impl TryFrom<u8> for Card {
    type Error = PokerError;

    fn try_from(idx: u8) -> Result<Self, PokerError> {
        match (Value::from_u8(idx / 4), Suit::from_u8(idx % 4)) {
            (Some(value), Some(suit)) => Ok(Self { value, suit }),
            _ => Err(PokerError::InvalidCardIndex(idx)),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

/// Parse the two char notation `As`, `Td`, `9c`.
///
/// `10h` is also accepted since that's how people tend to write a ten.
impl TryFrom<&str> for Card {
    type Error = PokerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let rest = value.strip_prefix("10").map(|r| (Value::Ten, r));
        let (card_value, rest) = match rest {
            Some(parsed) => parsed,
            None => {
                let mut chars = value.chars();
                let c = chars.next().ok_or(PokerError::TooFewChars)?;
                let v = Value::from_char(c).ok_or(PokerError::UnexpectedValueChar)?;
                (v, chars.as_str())
            }
        };

        let mut chars = rest.chars();
        let suit = chars
            .next()
            .ok_or(PokerError::TooFewChars)
            .and_then(|c| Suit::from_char(c).ok_or(PokerError::UnexpectedSuitChar))?;

        if chars.next().is_some() {
            return Err(PokerError::UnparsedCharsRemaining);
        }

        Ok(Self {
            value: card_value,
            suit,
        })
    }
}

impl TryFrom<String> for Card {
    type Error = PokerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

/// Parse a run of cards with no separators, `AsKd` or `QhJhTh`.
pub fn cards_from_str(s: &str) -> Result<Vec<Card>, PokerError> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.len() % 2 != 0 {
        return Err(PokerError::TooFewChars);
    }
    chars
        .chunks(2)
        .map(|pair| {
            let token: String = pair.iter().collect();
            Card::try_from(token.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_constructor() {
        let c = Card {
            value: Value::Three,
            suit: Suit::Spade,
        };
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!(Value::Three, c.value);
    }

    #[test]
    fn test_compare() {
        let c1 = Card::new(Value::Three, Suit::Spade);
        let c2 = Card::new(Value::Four, Suit::Spade);
        let c3 = Card::new(Value::Four, Suit::Club);

        // Make sure that the values are ordered
        assert!(c1 < c2);
        assert!(c2 > c1);
        // Make sure that suit is used.
        assert!(c3 > c2);
    }

    #[test]
    fn test_u8_encoding_is_a_bijection() {
        let mut seen = [false; 52];
        for v in Value::values() {
            for s in Suit::suits() {
                let card = Card::new(v, s);
                let idx = u8::from(card);
                assert!(idx < 52);
                assert!(!seen[idx as usize], "{card} encoded twice");
                seen[idx as usize] = true;
                assert_eq!(Ok(card), Card::try_from(idx));
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_out_of_range_u8_is_rejected() {
        for idx in 52..=u8::MAX {
            assert_eq!(Err(PokerError::InvalidCardIndex(idx)), Card::try_from(idx));
        }
    }

    #[test]
    fn test_six_of_clubs_is_17() {
        assert_eq!(17, u8::from(Card::new(Value::Six, Suit::Club)));
    }

    #[test]
    fn test_parse_round_trip_display() {
        for v in Value::values() {
            for s in Suit::suits() {
                let card = Card::new(v, s);
                assert_eq!(card, Card::try_from(card.to_string().as_str()).unwrap());
            }
        }
    }

    #[test]
    fn test_parse_ten_notations() {
        let expected = Card::new(Value::Ten, Suit::Heart);
        assert_eq!(expected, Card::try_from("Th").unwrap());
        assert_eq!(expected, Card::try_from("10h").unwrap());
    }

    #[test]
    fn test_unknown_tokens_fail_loudly() {
        assert_eq!(
            Err(PokerError::UnexpectedValueChar),
            Card::try_from("Xs")
        );
        assert_eq!(
            Err(PokerError::UnexpectedSuitChar),
            Card::try_from("Ax")
        );
        assert_eq!(Err(PokerError::TooFewChars), Card::try_from("A"));
        assert_eq!(Err(PokerError::TooFewChars), Card::try_from(""));
        assert_eq!(
            Err(PokerError::UnparsedCharsRemaining),
            Card::try_from("Asd")
        );
    }

    #[test]
    fn test_cards_from_str() {
        let cards = cards_from_str("AsKd").unwrap();
        assert_eq!(
            vec![
                Card::new(Value::Ace, Suit::Spade),
                Card::new(Value::King, Suit::Diamond)
            ],
            cards
        );
        assert!(cards_from_str("AsK").is_err());
    }

    #[test]
    fn test_size() {
        // Card should be really small. Hopefully just two u8's
        assert!(mem::size_of::<Card>() <= 4);
    }
}
