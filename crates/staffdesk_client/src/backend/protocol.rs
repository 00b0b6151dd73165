//! Protocol types for the sync worker.

use crate::api::ApiError;
use staffdesk_core::{Employee, EmployeeDraft};

/// Requests issued by the controller for the worker to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncCmd {
    /// Load the full employee list.
    FetchAll,
    Create { draft: EmployeeDraft },
    Update { id: String, draft: EmployeeDraft },
    Delete { id: String },
}

/// Results produced by the worker, one per command, in completion order.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Fetched { employees: Vec<Employee> },
    FetchFailed { error: ApiError },
    Created { employee: Employee },
    CreateFailed { error: ApiError },
    Updated { employee: Employee },
    UpdateFailed { id: String, error: ApiError },
    Deleted { id: String },
    DeleteFailed { id: String, error: ApiError },
}

impl SyncCmd {
    /// Short operation name for logs.
    pub fn op(&self) -> &'static str {
        match self {
            SyncCmd::FetchAll => "fetch",
            SyncCmd::Create { .. } => "create",
            SyncCmd::Update { .. } => "update",
            SyncCmd::Delete { .. } => "delete",
        }
    }
}
