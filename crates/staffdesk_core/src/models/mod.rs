//! Data models shared by the client, store, and mock API.

/// Employee records, drafts, and employment types.
pub mod employee;
