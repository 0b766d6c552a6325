/// Router assembly
///
/// Wires every route group, the session middleware, and the outer layer
/// stack into one `Router`. The binary and the integration tests both go
/// through [`build_router`] so they exercise the same surface:
///
/// ```no_run
/// use corkboard_api::app::{build_router, AppState};
/// use corkboard_api::config::Config;
///
/// # async fn assemble() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = sqlx::PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
/// # Ok(())
/// # }
/// ```
use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use corkboard_shared::auth::middleware::authenticate_request;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// State handed to every handler through Axum's `State` extractor
///
/// Cloning is cheap: the pool is reference-counted internally and the
/// config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Postgres pool shared by all handlers
    pub db: PgPool,

    /// Parsed configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Secret used to sign and verify session cookies
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Assembles the full route tree and its middleware stack
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                      # Liveness probe (public)
/// ├── /auth/
/// │   ├── POST /register           # Create profile + session cookie (public)
/// │   ├── POST /login              # Verify password + session cookie (public)
/// │   └── POST /logout             # Clear session cookie
/// ├── /projects/                   # Project CRUD + membership (session)
/// ├── /tasks/                      # Task CRUD + comments (session)
/// ├── /comments/                   # Comment deletion (session)
/// └── /users/                      # Profiles and role management (session)
/// ```
///
/// Layer order, outermost first: security headers, CORS, request tracing,
/// then per-group session authentication.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Logout needs the session cookie validated so a stale cookie is
    // reported as 401 rather than silently cleared
    let logout_routes = Router::new()
        .route("/logout", post(routes::auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Register and login are reachable without a session
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .merge(logout_routes);

    let project_routes = Router::new()
        .route("/", get(routes::projects::list_projects))
        .route("/", post(routes::projects::create_project))
        .route("/:id", get(routes::projects::get_project))
        .route("/:id", delete(routes::projects::delete_project))
        .route("/:id/members", get(routes::projects::list_members))
        .route("/:id/members", post(routes::projects::add_member))
        .route("/:id/members", delete(routes::projects::remove_member));

    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .route("/:id/comments", get(routes::comments::list_comments))
        .route("/:id/comments", post(routes::comments::create_comment));

    // Comment deletion addresses the comment directly, not via its task
    let comment_routes = Router::new().route("/:id", delete(routes::comments::delete_comment));

    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route("/me", get(routes::users::current_user))
        .route("/:id/role", put(routes::users::update_role));

    // Everything below requires a valid session
    let protected_routes = Router::new()
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/comments", comment_routes)
        .nest("/users", user_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// CORS policy from the configured origin list
///
/// A lone `*` entry (the unset-variable default) selects the permissive
/// development policy. Anything else becomes an explicit allow-list with
/// credentials enabled, which browsers require for cookie-carrying
/// cross-origin requests.
fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    if cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Validates the session cookie and stashes `AuthContext` in the request
/// extensions for handlers downstream
async fn session_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth = authenticate_request(req.headers(), state.session_secret())?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
