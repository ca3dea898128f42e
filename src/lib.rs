//! Bots playing no-limit Texas hold'em against each other.
//!
//! The crate is split the same way a hand is:
//!
//! - `core` has the cards, the deck and the hand evaluator. Nothing in
//!   there knows about betting.
//! - `holdem` has the starting hand table and the monte carlo win
//!   probability estimate the bots use to judge their hands.
//! - `arena` is where hands get played: seats, betting rounds, side pots,
//!   the bots themselves, and a single table tournament.
//!
//! ```
//! use holdem_bots::core::{HandCategory, best_hand, cards_from_str};
//!
//! let hole = cards_from_str("AhAd").unwrap();
//! let board = cards_from_str("AsKsKd7c2h").unwrap();
//! let (_five, category) = best_hand(&hole, &board).unwrap();
//! assert_eq!(HandCategory::FullHouse, category);
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to betting.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;
/// Bots, betting and tournaments.
pub mod arena;
