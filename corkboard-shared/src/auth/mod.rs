/// Authentication primitives shared by the API and client
///
/// Four pieces, layered bottom up:
///
/// - [`password`]: Argon2id hashing for stored credentials
/// - [`session`]: the HS256-signed token that rides in the session cookie
/// - [`middleware`]: turns a valid cookie into a request-scoped auth context
/// - [`authorization`]: role checks (admin / manager) on top of that context
///
/// Passwords never leave this module unhashed, verification is
/// constant-time, and session tokens expire after seven days unless a
/// caller picks a shorter lifetime.
///
/// ```no_run
/// use corkboard_shared::auth::password::{hash_password, verify_password};
/// use corkboard_shared::auth::session::{create_session_token, SessionClaims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = SessionClaims::new(Uuid::new_v4());
/// let token = create_session_token(&claims, "secret-key-of-at-least-32-bytes!!")?;
/// # Ok(())
/// # }
/// ```
pub mod authorization;
pub mod middleware;
pub mod password;
pub mod session;
