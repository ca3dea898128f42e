use crate::arena::action::Action;

use super::{Historian, HistorianError};

/// Passes each action straight to a closure.
#[derive(Debug, Clone)]
pub struct FnHistorian<F> {
    func: F,
}

impl<F: FnMut(Action) -> Result<(), HistorianError>> FnHistorian<F> {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F: FnMut(Action) -> Result<(), HistorianError>> Historian for FnHistorian<F> {
    fn record_action(&mut self, action: Action) -> Result<(), HistorianError> {
        (self.func)(action)
    }
}
