//! Root state container: the employee store plus UI state, updated only
//! through [`RootState::dispatch`].

/// Normalized employee collection.
pub mod employees;
/// UI interaction state and its reducer.
pub mod ui;


use employees::{EmployeeStore, EmployeesAction};
use ui::{UiAction, UiState};

/// Any action accepted by the root reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Employees(EmployeesAction),
    Ui(UiAction),
}

impl From<EmployeesAction> for Action {
    fn from(value: EmployeesAction) -> Self {
        Action::Employees(value)
    }
}

impl From<UiAction> for Action {
    fn from(value: UiAction) -> Self {
        Action::Ui(value)
    }
}

/// Owned application state. Nothing here is global; callers create one and
/// pass it around.
#[derive(Debug, Clone, Default)]
pub struct RootState {
    pub employees: EmployeeStore,
    pub ui: UiState,
}

impl RootState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an action to the slice that owns it.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::trace!(?action, "dispatch");
        match action {
            Action::Employees(action) => self.employees.apply(action),
            Action::Ui(action) => self.ui.apply(action),
        }
    }
}
