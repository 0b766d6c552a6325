/// Project endpoints
///
/// CRUD for project boards plus membership management.
///
/// # Endpoints
///
/// - `GET /projects` - List all projects
/// - `POST /projects` - Create a project
/// - `GET /projects/{id}` - Single project with creator name joined
/// - `DELETE /projects/{id}` - Delete a project (tasks cascade)
/// - `GET /projects/{id}/members` - Membership rows with profile fields
/// - `POST /projects/{id}/members` - Add a member (idempotent)
/// - `DELETE /projects/{id}/members` - Remove a member

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::SuccessResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use corkboard_shared::{
    auth::middleware::AuthContext,
    models::{
        member::{MemberWithProfile, ProjectMember},
        project::{CreateProject, Project, ProjectWithCreator},
    },
};
use serde::Deserialize;
use uuid::Uuid;

/// Create project request
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name (required, non-empty)
    pub name: Option<String>,

    /// Optional description
    pub description: Option<String>,
}

/// Add member request
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    /// Profile to add
    pub user_id: Uuid,

    /// Membership role label (defaults to "member")
    pub role: Option<String>,
}

/// Remove member request
#[derive(Debug, Deserialize)]
pub struct RemoveMemberRequest {
    /// Profile to remove
    pub user_id: Uuid,
}

/// Lists all projects, newest first
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_all(&state.db).await?;

    Ok(Json(projects))
}

/// Creates a project owned by the session user
///
/// # Errors
///
/// - `400 Bad Request`: Name missing or blank
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Project name is required".to_string()))?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name: name.to_string(),
            description: req.description.unwrap_or_default(),
            created_by: Some(auth.user_id),
        },
    )
    .await?;

    tracing::info!(project_id = project.id, "Created project");

    Ok((StatusCode::CREATED, Json(project)))
}

/// Fetches a single project with the creator's name joined in
///
/// # Errors
///
/// - `404 Not Found`: No project with this id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProjectWithCreator>> {
    let project = Project::find_by_id_with_creator(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Deletes a project; tasks and memberships cascade
///
/// # Errors
///
/// - `404 Not Found`: No project with this id
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    let deleted = Project::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    tracing::info!(project_id = id, "Deleted project");

    Ok(Json(SuccessResponse::ok()))
}

/// Lists members of a project with profile name and email flattened in
pub async fn list_members(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<MemberWithProfile>>> {
    let members = ProjectMember::list_for_project(&state.db, id).await?;

    Ok(Json(members))
}

/// Adds a profile to a project
///
/// Idempotent: adding an existing member is reported as success, so two
/// clients racing on the same roster cannot fail each other.
pub async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let role = req.role.as_deref().unwrap_or("member");

    ProjectMember::add(&state.db, id, req.user_id, role).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Removes a profile from a project
///
/// Removing a profile that is not a member is still success; the end state
/// is what was requested.
pub async fn remove_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RemoveMemberRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    ProjectMember::remove(&state.db, id, req.user_id).await?;

    Ok(Json(SuccessResponse::ok()))
}
