/// Task endpoints
///
/// CRUD for board tasks. Creation and completing (moving into `done`) are
/// gated on the manager role; the web client pre-checks the same rule but
/// the gateway enforces it regardless of what the client sends.
///
/// # Endpoints
///
/// - `GET /tasks?project_id=` - List tasks, optionally for one project
/// - `POST /tasks` - Create a task in the `todo` column (manager)
/// - `GET /tasks/{id}` - Single task with assignee joined
/// - `PUT /tasks/{id}` - Partial update; `status = done` needs manager
/// - `DELETE /tasks/{id}` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::SuccessResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use corkboard_shared::{
    auth::{authorization, middleware::AuthContext},
    models::task::{CreateTask, Task, TaskStatus, TaskWithAssignee, UpdateTask},
};
use serde::Deserialize;
use uuid::Uuid;

/// Task list query parameters
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Restrict to one project's board
    pub project_id: Option<i64>,
}

/// Create task request
///
/// Fields are optional so the handler can answer with the exact validation
/// messages the client surfaces, instead of a serde rejection.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Board the task belongs to
    pub project_id: Option<i64>,

    /// Task title (trimmed, at least 3 characters)
    pub title: Option<String>,

    /// Optional description
    pub description: Option<String>,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,

    /// Optional due date
    pub deadline: Option<NaiveDate>,
}

/// Lists tasks with assignee name and email joined in
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<TaskWithAssignee>>> {
    let tasks = Task::list_with_assignee(&state.db, query.project_id).await?;

    Ok(Json(tasks))
}

/// Creates a task in the `todo` column
///
/// Validation runs before the role check so malformed requests get the
/// validation message even from callers without the manager role.
///
/// # Errors
///
/// - `400 Bad Request`: "Invalid title: must be at least 3 characters"
/// - `400 Bad Request`: "Project ID is required"
/// - `403 Forbidden`: Caller is a plain member
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let title = req
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| title.len() >= 3)
        .ok_or_else(|| {
            ApiError::BadRequest("Invalid title: must be at least 3 characters".to_string())
        })?;

    let project_id = req
        .project_id
        .ok_or_else(|| ApiError::BadRequest("Project ID is required".to_string()))?;

    authorization::require_manager(&state.db, auth.user_id).await?;

    let task = Task::create(
        &state.db,
        CreateTask {
            project_id,
            title: title.to_string(),
            description: req.description.unwrap_or_default(),
            assigned_to: req.assigned_to,
            deadline: req.deadline,
        },
    )
    .await?;

    tracing::info!(task_id = task.id, project_id, "Created task");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Fetches a single task with the assignee joined in
///
/// # Errors
///
/// - `404 Not Found`: "Task not found"
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskWithAssignee>> {
    let task = Task::find_by_id_with_assignee(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Partially updates a task
///
/// Only fields present in the body are written; an explicit null on
/// `assigned_to` or `deadline` clears the column. Moving a task into
/// `done` requires the manager role.
///
/// # Errors
///
/// - `403 Forbidden`: `status = done` from a plain member
/// - `404 Not Found`: "Task not found"
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateTask>,
) -> ApiResult<Json<SuccessResponse>> {
    if update.status == Some(TaskStatus::Done) {
        authorization::require_manager(&state.db, auth.user_id).await?;
    }

    let updated = Task::update(&state.db, id, update).await?;
    if updated.is_none() {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(SuccessResponse::ok()))
}

/// Deletes a task; its comments cascade
///
/// # Errors
///
/// - `404 Not Found`: "Task not found"
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    let deleted = Task::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::info!(task_id = id, "Deleted task");

    Ok(Json(SuccessResponse::ok()))
}
