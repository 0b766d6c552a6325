/// Persistence layer: connection pooling and schema migrations
///
/// Row types and their queries live under `models`; this module only owns
/// how connections are made and how the schema gets to the right version.
///
/// A server typically wires both together at startup:
///
/// ```no_run
/// use corkboard_shared::db::migrations::run_migrations;
/// use corkboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn startup() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// };
/// let pool = create_pool(config).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```
pub mod migrations;
pub mod pool;
