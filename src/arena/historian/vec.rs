use std::{cell::RefCell, rc::Rc};

use crate::arena::action::Action;

use super::{Historian, HistorianError};

/// VecHistorian is a historian that will append each action to a shared
/// vector that can be looked at once the hand is over.
pub struct VecHistorian {
    records: Rc<RefCell<Vec<Action>>>,
}

impl VecHistorian {
    /// Create a new storage for the historian that can be introspected
    /// later.
    pub fn new_storage() -> Rc<RefCell<Vec<Action>>> {
        Rc::new(RefCell::new(vec![]))
    }

    pub fn new(records: Rc<RefCell<Vec<Action>>>) -> Self {
        Self { records }
    }
}

impl Historian for VecHistorian {
    fn record_action(&mut self, action: Action) -> Result<(), HistorianError> {
        self.records.try_borrow_mut()?.push(action);
        Ok(())
    }
}
