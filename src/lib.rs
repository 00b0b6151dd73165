//! Root crate facade for the staffdesk core, client, and mock API.

pub use staffdesk_client::{api, backend, console, connect, ApiClient, ApiError, Console};
pub use staffdesk_core::{
    config, constants, env, format, models, selectors, store, validation, AppError, Config, Employee,
    EmployeeDraft, EmploymentType, FilterCriteria, RootState, Selectors, Severity, UiAction,
};

/// Mock REST API (router, embedded server, repository).
pub mod server {
    pub use staffdesk_server::{
        create_app, resolve_bind_address, seed, serve_router, AppState, EmbeddedServer,
        EmployeeRepository,
    };
}
