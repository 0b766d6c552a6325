/// Authorization helpers for role-gated operations
///
/// Corkboard's permission model is deliberately small: a single global role
/// per profile, checked at the API layer for the handful of operations the
/// board restricts (creating tasks, completing tasks, changing roles).
/// Clients run the same gates before issuing a request; these helpers are
/// the server-side backstop for callers that skip the client.
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::auth::authorization::require_manager;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// // Only managers and admins get past this
/// require_manager(&pool, user_id).await?;
/// # Ok(())
/// # }
/// ```
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{Profile, ProfileRole};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Profile no longer exists (stale session)
    #[error("Profile {0} not found")]
    UnknownProfile(Uuid),

    /// Profile's role is insufficient for the operation
    #[error("Insufficient permissions: requires {required}, has {actual}")]
    InsufficientRole {
        required: &'static str,
        actual: ProfileRole,
    },

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Loads the caller's role, failing if the profile is gone
pub async fn current_role(pool: &PgPool, user_id: Uuid) -> Result<ProfileRole, AuthzError> {
    Profile::role_of(pool, user_id)
        .await?
        .ok_or(AuthzError::UnknownProfile(user_id))
}

/// Requires manager or admin
///
/// Gates task creation and moving tasks into `done`.
///
/// # Errors
///
/// Returns `AuthzError::InsufficientRole` for plain members.
pub async fn require_manager(pool: &PgPool, user_id: Uuid) -> Result<ProfileRole, AuthzError> {
    let role = current_role(pool, user_id).await?;

    if !role.can_complete_tasks() {
        return Err(AuthzError::InsufficientRole {
            required: "manager",
            actual: role,
        });
    }

    Ok(role)
}

/// Requires admin
///
/// Gates role administration.
///
/// # Errors
///
/// Returns `AuthzError::InsufficientRole` for managers and members.
pub async fn require_admin(pool: &PgPool, user_id: Uuid) -> Result<ProfileRole, AuthzError> {
    let role = current_role(pool, user_id).await?;

    if !role.can_manage_roles() {
        return Err(AuthzError::InsufficientRole {
            required: "admin",
            actual: role,
        });
    }

    Ok(role)
}
