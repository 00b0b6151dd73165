//! Core domain library for staffdesk (models, store, selectors, UI state).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across staffdesk crates.
pub mod constants;
/// Process-global environment mutation helpers.
pub mod env;
/// Application error types.
pub mod error;
/// Display formatting for salaries, dates, and names.
pub mod format;
/// Employee records and request payloads.
pub mod models;
/// Derived views over the store and UI state.
pub mod selectors;
/// Root state container and reducers.
pub mod store;
/// Form validation rules.
pub mod validation;

pub use config::Config;
pub use constants::{DEFAULT_API_URL, DEFAULT_PORT, FLASH_ROW_DURATION, SEARCH_DEBOUNCE};
pub use error::AppError;
pub use models::employee::{Employee, EmployeeDraft, EmploymentType};
pub use selectors::{FilterCriteria, Selectors};
pub use store::{
    employees::EmployeeStore,
    ui::{FormMode, Severity, UiAction, UiState},
    Action, RootState,
};

#[cfg(test)]
pub(crate) mod test_support;
