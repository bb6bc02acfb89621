/// Task CRUD endpoints
///
/// # Endpoints
///
/// - `GET /tasks` - all tasks, most recently created first
/// - `POST /tasks` - create a task
/// - `GET /tasks/:id` - fetch one task
/// - `PUT|PATCH /tasks/:id` - replace title and description
/// - `DELETE /tasks/:id` - delete a task
///
/// Every operation is a single synchronous unit of work against the
/// store: validate, then one statement. A missing row is an expected
/// outcome (404 envelope); only update surfaces unexpected persistence
/// failures in its envelope (500, message verbatim).

use crate::{
    app::AppState,
    error::ApiResult,
    response::TaskEnvelope,
    validation::first_error,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use taskpad_shared::models::task::{CreateTask, Task, UpdateTask};
use uuid::Uuid;
use validator::Validate;

/// Request body for store and update; both fields are required
///
/// Absent fields deserialize as empty strings and fail the length
/// rules, so a missing field gets the same envelope as a blank one.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TaskInput {
    /// Task title
    #[validate(length(min = 1, message = "The title field is required"))]
    pub title: String,

    /// Task description
    #[validate(length(min = 1, message = "The description field is required"))]
    pub description: String,
}

const TASK_FIELDS: &[&str] = &["title", "description"];

/// List endpoint
///
/// Always succeeds; an empty list is a valid result, not an error.
pub async fn index(State(state): State<AppState>) -> ApiResult<Json<TaskEnvelope>> {
    let tasks = Task::list_recent(&state.db).await?;

    Ok(Json(TaskEnvelope::list(&tasks)))
}

/// Create endpoint
///
/// # Responses
///
/// - `422` validation failure with the first error message
/// - `201` success envelope with the stored task
pub async fn store(
    State(state): State<AppState>,
    Json(input): Json<TaskInput>,
) -> ApiResult<Response> {
    if let Err(errors) = input.validate() {
        let body = TaskEnvelope::validation_failed(first_error(&errors, TASK_FIELDS));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            title: input.title,
            description: input.description,
        },
    )
    .await?;

    let body = TaskEnvelope::ok("Task created successfully.", &task);
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// Fetch endpoint
pub async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Response> {
    match Task::find_by_id(&state.db, id).await? {
        Some(task) => {
            let body = TaskEnvelope::ok("Task fetch successfully.", &task);
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        None => Ok(task_not_found()),
    }
}

/// Update endpoint
///
/// Validates first, then applies the change as one `UPDATE .. RETURNING`
/// statement; zero rows back means the task does not exist. A statement
/// failure is answered with the 500 envelope carrying the underlying
/// message, distinct from the not-found case.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<TaskInput>,
) -> ApiResult<Response> {
    if let Err(errors) = input.validate() {
        let body = TaskEnvelope::validation_failed(first_error(&errors, TASK_FIELDS));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    let result = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: input.title,
            description: input.description,
        },
    )
    .await;

    match result {
        Ok(Some(task)) => {
            let body = TaskEnvelope::ok("Task updated successfully.", &task);
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        Ok(None) => Ok(task_not_found()),
        Err(e) => {
            tracing::error!(task_id = %id, "Task update failed: {}", e);
            let body = TaskEnvelope::internal_error(e.to_string());
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}

/// Delete endpoint
///
/// The success envelope carries the removed record's last known values.
pub async fn destroy(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Response> {
    match Task::delete(&state.db, id).await? {
        Some(task) => {
            let body = TaskEnvelope::ok("Task deleted successfully.", &task);
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        None => Ok(task_not_found()),
    }
}

/// 404 with the fixed not-found envelope
fn task_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(TaskEnvelope::not_found())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_input_validation() {
        let input = TaskInput {
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
        };
        assert!(input.validate().is_ok());

        let input = TaskInput {
            title: String::new(),
            description: "2%".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            first_error(&errors, TASK_FIELDS),
            "The title field is required"
        );

        let input = TaskInput {
            title: "Buy milk".to_string(),
            description: String::new(),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            first_error(&errors, TASK_FIELDS),
            "The description field is required"
        );
    }

    #[test]
    fn test_absent_fields_validate_as_blank() {
        let input: TaskInput = serde_json::from_value(serde_json::json!({})).unwrap();

        let errors = input.validate().unwrap_err();
        assert_eq!(
            first_error(&errors, TASK_FIELDS),
            "The title field is required"
        );
    }

    #[test]
    fn test_title_error_surfaces_before_description() {
        let input = TaskInput {
            title: String::new(),
            description: String::new(),
        };

        let errors = input.validate().unwrap_err();
        assert_eq!(
            first_error(&errors, TASK_FIELDS),
            "The title field is required"
        );
    }
}
