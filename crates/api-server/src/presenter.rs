//! Maps use-case results onto HTTP responses

use std::fmt::Display;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use todo_core::task::{date::to_iso, Task};
use todo_core::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

pub type RouteError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub name: String,
    pub completed: bool,
    pub due_date: Option<String>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            name: task.name,
            completed: task.completed,
            due_date: task.due_date.as_ref().map(to_iso),
        }
    }
}

pub fn route_error(status: StatusCode, message: impl Into<String>) -> RouteError {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
        }),
    )
}

pub fn bad_request(message: impl Into<String>) -> RouteError {
    route_error(StatusCode::BAD_REQUEST, message)
}

pub fn task_not_found(id: impl Display) -> RouteError {
    bad_request(format!("Task with ID {} doesn't exist", id))
}

pub fn internal_error() -> RouteError {
    route_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

/// Client mistakes become 400 with their message; anything else is logged
/// and hidden behind a generic 500
pub fn error_response(error: Error) -> RouteError {
    if error.is_client_error() {
        bad_request(error.to_string())
    } else {
        tracing::error!("Unexpected error while handling task request: {}", error);
        internal_error()
    }
}
