//! Shared constants used across staffdesk crates.

use std::time::Duration;

/// Default port for the mock employee API.
pub const DEFAULT_PORT: u16 = 3001;

/// Default base URL for API clients.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// How long a just-created or just-updated row stays highlighted.
pub const FLASH_ROW_DURATION: Duration = Duration::from_millis(1500);

/// Quiet period before typed search text is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Collection path on the REST API.
pub const EMPLOYEES_PATH: &str = "employees";

/// Notification texts for successful mutations.
pub const MSG_EMPLOYEE_CREATED: &str = "Employee created successfully";
/// Shown after a successful update.
pub const MSG_EMPLOYEE_UPDATED: &str = "Employee updated successfully";
/// Shown after a successful delete.
pub const MSG_EMPLOYEE_DELETED: &str = "Employee deleted successfully";

/// Last-resort error text when neither the body nor the transport explains a failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";
