/// Schema migration runner
///
/// Wraps sqlx's embedded migrator. The `migrations/` directory at the
/// workspace root holds paired `{version}_{name}.up.sql` /
/// `{version}_{name}.down.sql` files; `sqlx::migrate!` compiles them into
/// the binary so deployments carry their own schema.
use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

/// Applies every migration the database has not seen yet
///
/// Safe to call on every startup; an up-to-date database is a no-op. A
/// concurrent run on another node blocks on sqlx's advisory lock instead
/// of racing.
///
/// # Errors
///
/// Fails when a migration file is malformed, a statement errors, or a
/// previously applied migration's checksum no longer matches.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying pending schema migrations");

    if let Err(e) = sqlx::migrate!("../migrations").run(pool).await {
        warn!("Migration run aborted: {e}");
        return Err(e);
    }

    info!("Schema is up to date");
    Ok(())
}

/// Creates the target database when it is missing
///
/// Development and test conveniences only; production databases are
/// provisioned ahead of time.
///
/// # Errors
///
/// Fails when the server is unreachable or the role lacks CREATEDB.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        debug!("Database already present");
        return Ok(());
    }

    info!("Database missing, creating it");
    Postgres::create_database(database_url).await?;
    info!("Database created");
    Ok(())
}
