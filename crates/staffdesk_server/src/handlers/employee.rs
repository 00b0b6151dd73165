//! Employee HTTP handlers.

use super::extract::ApiJson;
use crate::{error::HttpError, AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use staffdesk_core::{validation::validate_draft, Employee, EmployeeDraft};

fn checked(draft: EmployeeDraft) -> Result<EmployeeDraft, AppError> {
    validate_draft(&draft)?;
    Ok(draft)
}

/// List every employee in creation order.
///
/// # Errors
/// Returns an error if the repository is unavailable.
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, HttpError> {
    Ok(Json(state.repo.list()?))
}

/// Fetch one employee.
///
/// # Errors
/// `404` when the id is unknown.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, HttpError> {
    let employee = state.repo.get(&id)?.ok_or(AppError::NotFound)?;
    Ok(Json(employee))
}

/// Create an employee from a draft body.
///
/// # Returns
/// `201` with the stored record, including its new id.
///
/// # Errors
/// `400` when the body is malformed or fails validation.
pub async fn create_employee(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<EmployeeDraft>,
) -> Result<(StatusCode, Json<Employee>), HttpError> {
    let employee = state.repo.create(checked(draft)?)?;
    tracing::info!(id = %employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Replace the fields of an existing employee.
///
/// # Errors
/// `400` for invalid bodies, `404` when the id is unknown.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<EmployeeDraft>,
) -> Result<Json<Employee>, HttpError> {
    let employee = state
        .repo
        .update(&id, checked(draft)?)?
        .ok_or(AppError::NotFound)?;
    tracing::info!(id = %employee.id, "employee updated");
    Ok(Json(employee))
}

/// Delete an employee.
///
/// # Returns
/// An empty JSON object.
///
/// # Errors
/// `404` when the id is unknown.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, HttpError> {
    if !state.repo.delete(&id)? {
        return Err(AppError::NotFound.into());
    }
    tracing::info!(id = %id, "employee deleted");
    Ok(Json(json!({})))
}
