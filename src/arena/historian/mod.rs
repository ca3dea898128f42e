use thiserror::Error;

use super::action::Action;

/// Ways a historian can fail to keep up with the table.
#[derive(Error, Debug)]
pub enum HistorianError {
    #[error("Unable to record action")]
    UnableToRecordAction,
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Borrow Mut Error: {0}")]
    BorrowMutError(#[from] std::cell::BorrowMutError),
    #[error("Borrow Error: {0}")]
    BorrowError(#[from] std::cell::BorrowError),
}

/// Observer of everything that happens during a hand, in the order it
/// happens. Used for hand logs, replays and test assertions.
pub trait Historian {
    /// Receives one event. On error the simulation stops sending events to
    /// this historian, or panics when `panic_on_historian_error` is set.
    fn record_action(&mut self, action: Action) -> Result<(), HistorianError>;
}

mod fn_historian;
#[cfg(feature = "serde")]
mod json;
mod vec;

pub use fn_historian::FnHistorian;
#[cfg(feature = "serde")]
pub use json::JsonHistorian;
pub use vec::VecHistorian;
