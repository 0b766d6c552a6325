/// Authentication support for Axum middleware
///
/// The API authenticates every non-public route from the session cookie.
/// This module holds the pieces the router's auth layer is built from: the
/// cookie-to-claims extraction and the `AuthContext` that handlers read
/// back out of request extensions.
///
/// # Request Extensions
///
/// After successful authentication the auth layer adds:
/// - `AuthContext`: the authenticated profile ID
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use corkboard_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::{validate_session_token, SessionError, SESSION_COOKIE};

/// Authentication context added to request extensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated profile ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context for a validated session
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session cookie on the request
    #[error("Authentication required")]
    MissingSession,

    /// Session cookie present but unusable
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Session cookie present but expired
    #[error("Session has expired")]
    SessionExpired,
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired => AuthError::SessionExpired,
            other => AuthError::InvalidSession(other.to_string()),
        }
    }
}

/// Authenticates a request from its headers
///
/// Reads the session cookie, validates the token, and returns the context
/// the auth layer inserts into request extensions. Pure function of the
/// headers; the axum layer wrapping it lives in the API crate.
///
/// # Errors
///
/// - `AuthError::MissingSession` when the cookie is absent
/// - `AuthError::SessionExpired` for expired tokens
/// - `AuthError::InvalidSession` for any other rejection
pub fn authenticate_request(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let jar = CookieJar::from_headers(headers);

    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AuthError::MissingSession)?;

    let claims = validate_session_token(&token, secret)?;

    Ok(AuthContext::new(claims.sub))
}
