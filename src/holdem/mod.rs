/// Module with the canned pre-flop strength table.
mod starting_hand;
/// Export `StartingHand`
pub use self::starting_hand::{DEFAULT_PREFLOP_STRENGTH, StartingHand, preflop_strength};

/// Module for `MonteCarloGame` and the win probability estimate.
mod monte_carlo_game;
/// Export the estimator.
pub use self::monte_carlo_game::{
    DEFAULT_TRIALS, MonteCarloGame, NO_INFORMATION_EQUITY, estimate_win_probability,
    opponent_adjustment,
};
