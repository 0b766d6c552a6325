/// User endpoints
///
/// Profile listing for assignee and member pickers, the session user's own
/// profile, and admin-only role management.
///
/// # Endpoints
///
/// - `GET /users` - All profiles (id, full_name, email, role)
/// - `GET /users/me` - The session user's profile
/// - `PUT /users/{id}/role` - Change a profile's role (admin)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::SuccessResponse,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use corkboard_shared::{
    auth::{authorization, middleware::AuthContext},
    models::profile::{Profile, ProfileRole, ProfileSummary},
};
use serde::Deserialize;
use uuid::Uuid;

/// Role change request
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    /// One of "admin", "manager", "member"
    pub role: String,
}

/// Lists every profile for pickers and the admin roster
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<ProfileSummary>>> {
    let profiles = Profile::list_summaries(&state.db).await?;

    Ok(Json(profiles))
}

/// Returns the session user's profile
///
/// # Errors
///
/// - `404 Not Found`: Profile was deleted while the session was live
pub async fn current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Profile>> {
    let profile = Profile::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile))
}

/// Changes a profile's role
///
/// Admin only. Takes effect on the target's next request because sessions
/// carry no role claim.
///
/// # Errors
///
/// - `400 Bad Request`: Unknown role label
/// - `403 Forbidden`: Caller is not an admin
/// - `404 Not Found`: No profile with this id
pub async fn update_role(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let role = ProfileRole::from_str(&req.role)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid role: {}", req.role)))?;

    authorization::require_admin(&state.db, auth.user_id).await?;

    let updated = Profile::update_role(&state.db, id, role).await?;
    if !updated {
        return Err(ApiError::NotFound("Profile not found".to_string()));
    }

    tracing::info!(profile_id = %id, role = %role, "Changed profile role");

    Ok(Json(SuccessResponse::ok()))
}
