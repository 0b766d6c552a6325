/// Gateway error funnel
///
/// One enum covers every handler; `IntoResponse` turns it into the wire
/// shape the web client parses on every non-2xx response:
///
/// ```json
/// { "error": "<human-readable message>" }
/// ```
///
/// `From` impls pull the shared crate's auth and database errors into the
/// same funnel so handlers can lean on `?` throughout.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::error::ErrorKind;

/// Shorthand for handler return types
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a handler can fail with, one variant per status code
///
/// The mapping to `StatusCode` lives in `status` below.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate email and similar unique-constraint hits
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Body of every failure response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to put on the wire
    ///
    /// Internal errors are logged server-side and replaced with a generic
    /// message; everything else passes through.
    fn public_message(self) -> String {
        match self {
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {msg}");
                "An internal error occurred".to_string()
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.public_message(),
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                // The only unique constraints in the schema are the email
                // column and primary keys
                ErrorKind::UniqueViolation => {
                    if db_err
                        .constraint()
                        .is_some_and(|constraint| constraint.contains("email"))
                    {
                        ApiError::Conflict("Email already exists".to_string())
                    } else {
                        ApiError::Conflict("Resource already exists".to_string())
                    }
                }
                ErrorKind::ForeignKeyViolation => {
                    ApiError::BadRequest("Referenced resource does not exist".to_string())
                }
                _ => ApiError::InternalError(format!("Database error: {db_err}")),
            },
            other => ApiError::InternalError(format!("Database error: {other}")),
        }
    }
}

impl From<corkboard_shared::auth::middleware::AuthError> for ApiError {
    fn from(err: corkboard_shared::auth::middleware::AuthError) -> Self {
        use corkboard_shared::auth::middleware::AuthError;

        match err {
            AuthError::MissingSession => {
                ApiError::Unauthorized("Authentication required".to_string())
            }
            AuthError::InvalidSession(msg) => ApiError::Unauthorized(msg),
            AuthError::SessionExpired => ApiError::Unauthorized("Session expired".to_string()),
        }
    }
}

impl From<corkboard_shared::auth::authorization::AuthzError> for ApiError {
    fn from(err: corkboard_shared::auth::authorization::AuthzError) -> Self {
        use corkboard_shared::auth::authorization::AuthzError;

        match err {
            AuthzError::UnknownProfile(_) => ApiError::Unauthorized("Unknown profile".to_string()),
            AuthzError::InsufficientRole { required, .. } => {
                ApiError::Forbidden(format!("Requires {required} role"))
            }
            AuthzError::DatabaseError(err) => {
                ApiError::InternalError(format!("Database error: {err}"))
            }
        }
    }
}

impl From<corkboard_shared::auth::password::PasswordError> for ApiError {
    fn from(err: corkboard_shared::auth::password::PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {err}"))
    }
}

impl From<corkboard_shared::auth::session::SessionError> for ApiError {
    fn from(err: corkboard_shared::auth::session::SessionError) -> Self {
        use corkboard_shared::auth::session::SessionError;

        match err {
            SessionError::Expired => ApiError::Unauthorized("Session expired".to_string()),
            SessionError::Rejected(msg) => ApiError::Unauthorized(msg),
            SessionError::Signing(msg) => {
                ApiError::InternalError(format!("Session creation failed: {msg}"))
            }
        }
    }
}

/// Validation failures become 400s carrying the first field message
///
/// The client surfaces one message per failed request, so a structured
/// per-field list would be wasted on it.
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(_, field_errors)| field_errors.iter())
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Request validation failed".to_string());

        ApiError::BadRequest(message)
    }
}
