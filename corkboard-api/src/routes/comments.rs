/// Comment endpoints
///
/// Per-task discussion threads. Comments may carry an image URL pointing at
/// an uploaded attachment; the gateway stores the URL as-is.
///
/// # Endpoints
///
/// - `GET /tasks/{id}/comments` - Thread in posting order, author joined
/// - `POST /tasks/{id}/comments` - Post as the session user
/// - `DELETE /comments/{id}` - Delete a comment

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
    models::comment::{Comment, CommentWithAuthor, CreateComment},
};
use serde::Deserialize;

/// Create comment request
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment body
    pub content: String,

    /// Attachment URL from the upload endpoint, if any
    pub image_url: Option<String>,
}

/// Lists a task's comments oldest-first with author fields joined in
pub async fn list_comments(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Vec<CommentWithAuthor>>> {
    let comments = Comment::list_for_task(&state.db, task_id).await?;

    Ok(Json(comments))
}

/// Posts a comment as the session user
///
/// # Errors
///
/// - `400 Bad Request`: Blank content
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    if req.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Comment content is required".to_string(),
        ));
    }

    let comment = Comment::create(
        &state.db,
        CreateComment {
            task_id,
            user_id: auth.user_id,
            content: req.content,
            image_url: req.image_url,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Deletes a comment
///
/// # Errors
///
/// - `404 Not Found`: "Comment not found"
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    let deleted = Comment::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Comment not found".to_string()));
    }

    Ok(Json(SuccessResponse::ok()))
}
