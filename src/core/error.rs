use thiserror::Error;

use super::Card;

/// This is the core error type for holdem_bots.
/// It uses `thiserror` to provide readable error messages
#[derive(Error, Debug, Hash, Clone, PartialEq, Eq)]
pub enum PokerError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("{0} doesn't encode a card, only 0 through 51 do")]
    InvalidCardIndex(u8),
    #[error("Needed {needed} cards but only {available} are available")]
    InsufficientCards { needed: usize, available: usize },
    #[error("Card {0} was supplied more than once")]
    DuplicateCard(Card),
    #[error("A holdem board never has more than 5 cards, got {0}")]
    TooManyCommunityCards(usize),
}
