/// Configuration for the API server
///
/// Everything is read from environment variables, with `.env` support in
/// development via dotenvy. `Config::from_env` is the only constructor the
/// binary uses; tests build the structs directly.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Bind host (default: 0.0.0.0)
/// - `API_PORT`: Bind port (default: 8080)
/// - `API_PRODUCTION`: `1`/`true` enables HTTPS-only hardening, HSTS and
///   the `Secure` cookie flag (default: false)
/// - `SESSION_SECRET`: Secret for signing session cookies (required,
///   at least 32 characters)
/// - `CORS_ALLOWED_ORIGINS`: Comma-separated origin list; unset or `*`
///   means permissive CORS for development
/// - `RUST_LOG`: Log filter (default: info)
///
/// # Example
///
/// ```no_run
/// use corkboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use std::env;

/// Everything the binary needs to start, grouped by concern
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
}

/// Listener and CORS settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `["*"]` means permissive (development)
    pub cors_origins: Vec<String>,

    /// Whether the server is behind HTTPS in production
    pub production: bool,
}

/// Postgres connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret key for signing session tokens
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Splits a comma-separated origin list, dropping empty entries
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Reads every setting from the environment
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing, a numeric
    /// variable does not parse, or the session secret is too short.
    pub fn from_env() -> anyhow::Result<Self> {
        // Development convenience; missing .env is not an error
        dotenvy::dotenv().ok();

        let host = env_or("API_HOST", "0.0.0.0");
        let port = env_or("API_PORT", "8080")
            .parse::<u16>()
            .context("API_PORT must be a port number")?;

        let production = env::var("API_PRODUCTION")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let mut cors_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();
        if cors_origins.is_empty() {
            cors_origins.push("*".to_string());
        }

        let url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;
        let max_connections = env_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a number")?;

        let secret = env::var("SESSION_SECRET")
            .context("SESSION_SECRET environment variable is required")?;
        if secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 characters long");
        }

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            database: DatabaseConfig {
                url,
                max_connections,
            },
            session: SessionConfig { secret },
        })
    }

    /// `host:port` string for the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
