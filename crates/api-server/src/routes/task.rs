//! Task API endpoints
//!
//! RESTful API for task CRUD operations.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use todo_core::task::{TaskFields, TaskQuery};

use crate::presenter::{
    bad_request, error_response, task_not_found, RouteError, TaskResponse,
};
use crate::state::AppState;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub filter: Option<String>,
}

fn parse_id(raw: &str) -> Result<i64, RouteError> {
    raw.trim().parse().map_err(|_| task_not_found(raw))
}

fn parse_body(payload: Result<Json<TaskFields>, JsonRejection>) -> Result<TaskFields, RouteError> {
    match payload {
        Ok(Json(fields)) => Ok(fields),
        Err(rejection) => {
            tracing::debug!("Rejected task body: {}", rejection);
            Err(bad_request("Invalid request body"))
        }
    }
}

fn parse_list_query(
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<TaskQuery, RouteError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("Rejected task list query: {}", rejection);
        bad_request("Invalid query string")
    })?;
    TaskQuery::parse(query.order.as_deref(), query.filter.as_deref()).map_err(error_response)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /task - List tasks, optionally filtered and ordered
async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskResponse>>, RouteError> {
    let query = parse_list_query(query)?;

    let tasks = state
        .use_cases()
        .list
        .execute(&query)
        .await
        .map_err(error_response)?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /task - Create a new task
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskFields>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), RouteError> {
    let task = parse_body(payload)?.validate().map_err(error_response)?;

    let created = state
        .use_cases()
        .create
        .execute(task)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(created))))
}

/// PUT /task/:id - Replace a task
async fn update_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TaskFields>, JsonRejection>,
) -> Result<Json<TaskResponse>, RouteError> {
    let id = parse_id(&raw_id)?;
    let task = parse_body(payload)?.validate().map_err(error_response)?;

    let updated = state
        .use_cases()
        .update
        .execute(id, task)
        .await
        .map_err(error_response)?;

    match updated {
        Some(task) => Ok(Json(TaskResponse::from(task))),
        None => Err(task_not_found(id)),
    }
}

/// DELETE /task/:id - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, RouteError> {
    let id = parse_id(&raw_id)?;

    let deleted = state
        .use_cases()
        .delete
        .execute(id)
        .await
        .map_err(error_response)?;

    match deleted {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(task_not_found(id)),
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/task", get(list_tasks).post(create_task))
        .route("/task/{id}", put(update_task).delete(delete_task))
}
