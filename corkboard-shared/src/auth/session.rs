/// Session token generation and validation
///
/// Sessions are stateless: a signed token (HS256) carried in an HttpOnly
/// cookie. There is no server-side session table and no refresh flow; when a
/// token expires the user logs in again.
///
/// # Security
///
/// - Tokens are signed with HS256 over a shared secret
/// - Default lifetime is 7 days
/// - Validation checks signature, expiration, not-before, and issuer
/// - The API config loader enforces a secret of at least 32 bytes
///
/// # Example
///
/// ```
/// use corkboard_shared::auth::session::{create_session_token, validate_session_token, SessionClaims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "an-example-secret-of-at-least-32-bytes!!";
///
/// let claims = SessionClaims::new(user_id);
/// let token = create_session_token(&claims, secret)?;
///
/// let validated = validate_session_token(&token, secret)?;
/// assert_eq!(validated.sub, user_id);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the cookie that carries the session token
pub const SESSION_COOKIE: &str = "corkboard_session";

/// Issuer claim stamped into every session token
const ISSUER: &str = "corkboard";

/// Default session lifetime
pub fn default_session_lifetime() -> Duration {
    Duration::days(7)
}

/// Failures from signing or checking session tokens
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Signing produced no token
    #[error("Could not sign session token: {0}")]
    Signing(String),

    /// Bad signature, wrong issuer, or malformed token
    #[error("Session token rejected: {0}")]
    Rejected(String),

    /// Token was valid once but its lifetime is over
    #[error("Session has expired")]
    Expired,
}

/// Claims carried by a session token
///
/// Standard JWT claims only; the user's role is NOT embedded so a role
/// change takes effect immediately instead of at the next login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Profile id of the signed-in user
    pub sub: Uuid,

    /// Always "corkboard"; rejects tokens minted by other services
    pub iss: String,

    /// Issued-at, seconds since the epoch
    pub iat: i64,

    /// Expiry, seconds since the epoch
    pub exp: i64,

    /// Not valid before, seconds since the epoch
    pub nbf: i64,
}

impl SessionClaims {
    /// Creates claims with the default lifetime
    pub fn new(user_id: Uuid) -> Self {
        Self::with_lifetime(user_id, default_session_lifetime())
    }

    /// Creates claims with a custom lifetime
    pub fn with_lifetime(user_id: Uuid, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs a session token from claims
///
/// # Errors
///
/// Returns `SessionError::Signing` if encoding fails
pub fn create_session_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| SessionError::Signing(format!("token encoding failed: {e}")))
}

/// Validates a session token and extracts its claims
///
/// Verifies the signature, expiration, not-before, and issuer.
///
/// # Errors
///
/// Returns `SessionError::Expired` for expired tokens and
/// `SessionError::Rejected` for every other rejection (bad signature,
/// wrong issuer, malformed token).
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut checks = Validation::new(Algorithm::HS256);
    checks.set_issuer(&[ISSUER]);
    checks.validate_exp = true;
    checks.validate_nbf = true;

    let token_data = decode::<SessionClaims>(token, &key, &checks).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        _ => SessionError::Rejected(format!("token validation failed: {e}")),
    })?;

    Ok(token_data.claims)
}
