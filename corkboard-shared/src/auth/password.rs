/// Password hashing with Argon2id
///
/// Hashes are stored as PHC strings, so the cost parameters and salt travel
/// with each hash and old hashes keep verifying after the defaults change.
///
/// # Example
///
/// ```
/// use corkboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password_123")?;
/// assert!(verify_password("super_secret_password_123", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Memory cost in KiB (64 MB)
const MEMORY_KIB: u32 = 65536;

/// Iteration count
const PASSES: u32 = 3;

/// Parallelism lanes
const LANES: u32 = 4;

/// Digest length in bytes
const HASH_LEN: usize = 32;

/// Failures from hashing or verifying passwords
///
/// A wrong password is NOT an error; `verify_password` reports it as
/// `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Hashing a new password failed
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),

    /// The hash loaded from the database is not a valid PHC string
    #[error("stored password hash is unusable: {0}")]
    BadStoredHash(argon2::password_hash::Error),

    /// Verification failed for a reason other than a mismatch
    #[error("password verification failed: {0}")]
    Verify(argon2::password_hash::Error),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(MEMORY_KIB)
        .t_cost(PASSES)
        .p_cost(LANES)
        .output_len(HASH_LEN)
        .build()
        .map_err(|e| PasswordError::Hash(e.into()))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password with a fresh random salt
///
/// Produces a PHC string like `$argon2id$v=19$m=65536,t=3,p=4$...$...`.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] when the underlying hasher fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;

    Ok(hash.to_string())
}

/// Checks a password against a stored PHC hash in constant time
///
/// # Errors
///
/// Returns [`PasswordError::BadStoredHash`] when the stored hash cannot be
/// parsed, or [`PasswordError::Verify`] for other verifier failures.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(PasswordError::BadStoredHash)?;

    // The cost parameters come from the PHC string, not the instance
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordError::Verify(err)),
    }
}
