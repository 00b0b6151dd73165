//! HTTP request handlers.

/// Employee CRUD endpoints.
pub mod employee;
pub(crate) mod extract;
