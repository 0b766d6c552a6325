/// Liveness endpoint
///
/// `GET /health` answers 200 whether or not Postgres is reachable. Load
/// balancers only need to know the process is up; the body distinguishes
/// `ok` from `degraded` so operators can see a dead database without the
/// fleet draining itself.
use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use corkboard_shared::db::pool;
use serde::{Deserialize, Serialize};

/// Body of the health check: `status` is `ok` or `degraded`, `database`
/// is `connected` or `disconnected`, `version` comes from the crate.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

impl HealthResponse {
    fn report(db_ok: bool) -> Self {
        let (status, database) = if db_ok {
            ("ok", "connected")
        } else {
            ("degraded", "disconnected")
        };

        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let db_ok = pool::ping(&state.db).await.is_ok();
    Ok(Json(HealthResponse::report(db_ok)))
}
