//! Employee directory client: REST API access, sync worker, and controller.

/// Blocking HTTP client and error normalization.
pub mod api;
/// Background sync worker and its command/event protocol.
pub mod backend;
/// State-owning controller applying sync results.
pub mod console;

pub use api::{ApiClient, ApiError};
pub use backend::{spawn_backend, BackendHandle, SyncCmd, SyncEvent};
pub use console::Console;

/// Spawn a sync worker for `client` and wrap it in a fresh [`Console`].
///
/// # Errors
/// Returns an error if the worker thread cannot be spawned.
pub fn connect(client: ApiClient) -> std::io::Result<Console> {
    Ok(Console::new(spawn_backend(client)?))
}
