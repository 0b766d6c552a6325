/// Session endpoints: register, login, logout
///
/// Register and login both set the `corkboard_session` cookie: an HttpOnly,
/// SameSite=Lax signed token the browser sends back on every request. The
/// token carries only the profile id, so role changes take effect on the
/// next request rather than the next login.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create profile and start a session
/// - `POST /auth/login` - Verify password and start a session
/// - `POST /auth/logout` - Clear the session cookie

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::SuccessResponse,
};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use corkboard_shared::{
    auth::{
        password,
        session::{self, SessionClaims, SESSION_COOKIE},
    },
    models::profile::{CreateProfile, Profile},
};
use serde::Deserialize;
use validator::Validate;

/// Body of `POST /auth/register`
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub full_name: Option<String>,
}

/// Body of `POST /auth/login`
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Builds the session cookie with the standard attributes
fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    let max_age = time::Duration::seconds(session::default_session_lifetime().num_seconds());

    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Register a new profile
///
/// Creates a profile with the default `member` role and starts a session.
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "hunter2hunter2",
///   "full_name": "Dana Scully"
/// }
/// ```
///
/// # Errors
///
/// 400 when validation fails, 409 when the email is taken
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<Profile>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let profile = Profile::create(
        &state.db,
        CreateProfile {
            email: req.email,
            password_hash,
            full_name: req.full_name,
            avatar_url: None,
        },
    )
    .await?;

    tracing::info!(profile_id = %profile.id, "Registered new profile");

    let claims = SessionClaims::new(profile.id);
    let token = session::create_session_token(&claims, state.session_secret())?;
    let jar = jar.add(session_cookie(token, state.config.api.production));

    Ok((StatusCode::CREATED, jar, Json(profile)))
}

/// Login with email and password
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "hunter2hunter2"
/// }
/// ```
///
/// # Errors
///
/// 400 when validation fails, 401 for a wrong email or password. The two
/// credential failures share one message so responses do not reveal which
/// emails have accounts.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<Profile>)> {
    req.validate()?;

    let profile = Profile::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &profile.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    Profile::touch_last_login(&state.db, profile.id).await?;

    let claims = SessionClaims::new(profile.id);
    let token = session::create_session_token(&claims, state.session_secret())?;
    let jar = jar.add(session_cookie(token, state.config.api.production));

    Ok((jar, Json(profile)))
}

/// Logout
///
/// Clears the session cookie. The removal cookie must carry the same path
/// the session cookie was set with or browsers keep the original alive.
///
/// # Endpoint
///
/// ```text
/// POST /auth/logout
/// ```
pub async fn logout(jar: CookieJar) -> ApiResult<(CookieJar, Json<SuccessResponse>)> {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    Ok((jar, Json(SuccessResponse::ok())))
}
