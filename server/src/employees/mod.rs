//! `/api/employees` routes.

mod input;

use input::{CreateEmployee, InputError, UpdateEmployee, parse_int};

use axum::{
    Json, Router,
    extract::{FromRequest, Path, State},
    http::StatusCode,
    routing::get,
};
use entity::employees;
use platform_api::{ApiError, ApiResult};
use platform_db::DbError;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{config::PROTECTED_IDS, http::AppState};

const NOT_FOUND: &str = "Employee not found";
const DELETED: &str = "Employee deleted successfully.";
const CREATE_FAILED: &str = "Error creating employee";
const FETCH_FAILED: &str = "Error fetching employee";
const UPDATE_FAILED: &str = "Error updating employee";
const DELETE_FAILED: &str = "Error deleting employee";

/// JSON body extractor whose rejections render as `{message}` with 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/employees",
            get(list_employees).post(create_employee),
        )
        .route(
            "/api/employees/{id}",
            get(show_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
}

fn not_found() -> ApiError {
    ApiError::not_found(NOT_FOUND)
}

// Path ids go through the same leading-integer parse as body fields. An id
// that does not coerce fails the operation like any value the store rejects.
fn parse_id(raw: &str, failed: &'static str) -> ApiResult<i32> {
    parse_int(raw)
        .map_err(|err| ApiError::internal(failed, format!("invalid value for `id`: {err}")))
}

#[instrument(name = "employees.create", skip_all)]
async fn create_employee(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateEmployee>,
) -> ApiResult<(StatusCode, Json<employees::Model>)> {
    let new = body.into_new_employee().map_err(|err| match err {
        InputError::Missing => ApiError::validation(err.to_string()),
        _ => ApiError::internal(CREATE_FAILED, err),
    })?;
    let created = state
        .store
        .create(new)
        .await
        .map_err(|err| ApiError::internal(CREATE_FAILED, err))?;
    info!(id = created.id, "employee created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(name = "employees.list", skip_all)]
async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<employees::Model>>> {
    let all = state
        .store
        .find_all()
        .await
        .map_err(|err| ApiError::internal("Error fetching employees", err))?;
    Ok(Json(all))
}

#[instrument(name = "employees.show", skip(state))]
async fn show_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<employees::Model>> {
    let id = parse_id(&id, FETCH_FAILED)?;
    state
        .store
        .find_by_id(id)
        .await
        .map_err(|err| ApiError::internal(FETCH_FAILED, err))?
        .map(Json)
        .ok_or_else(not_found)
}

#[instrument(name = "employees.update", skip(state, body))]
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateEmployee>,
) -> ApiResult<Json<employees::Model>> {
    let id = parse_id(&id, UPDATE_FAILED)?;
    let changes = body
        .into_changes()
        .map_err(|err| ApiError::internal(UPDATE_FAILED, err))?;
    match state.store.update(id, changes).await {
        Ok(updated) => {
            info!(id, "employee updated");
            Ok(Json(updated))
        }
        Err(DbError::NotFound) => Err(not_found()),
        Err(err) => Err(ApiError::internal(UPDATE_FAILED, err)),
    }
}

#[instrument(name = "employees.delete", skip(state))]
async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Message>> {
    let id = parse_id(&id, DELETE_FAILED)?;
    if state.variant.is_protected(id) {
        info!(id, "refused delete of protected employee");
        return Err(ApiError::forbidden(format!(
            "Employees with ids {} through {} are protected and cannot be deleted.",
            PROTECTED_IDS.start(),
            PROTECTED_IDS.end()
        )));
    }
    match state.store.delete(id).await {
        Ok(()) => {
            info!(id, "employee deleted");
            Ok(Json(Message { message: DELETED }))
        }
        Err(DbError::NotFound) => Err(not_found()),
        Err(err) => Err(ApiError::internal(DELETE_FAILED, err)),
    }
}
