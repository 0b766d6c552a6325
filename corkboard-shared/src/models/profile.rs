/// Profile model and database operations
///
/// A profile is a user account plus the presentation fields the UI needs
/// (display name, avatar). Every profile carries a single global role that
/// drives what the board lets the user do.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE profile_role AS ENUM ('admin', 'manager', 'member');
///
/// CREATE TABLE profiles (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email CITEXT NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     full_name VARCHAR(255),
///     avatar_url VARCHAR(512),
///     role profile_role NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
///
/// # Roles
///
/// - **admin**: everything managers can do, plus role administration
/// - **manager**: create tasks, move tasks into `done`
/// - **member**: work the board short of completing tasks
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::models::profile::{CreateProfile, Profile};
///
/// # async fn example(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
/// let profile = Profile::create(pool, CreateProfile {
///     email: "dana@example.com".to_string(),
///     password_hash: "$argon2id$v=19$m=65536,t=3,p=4$...".to_string(),
///     full_name: Some("Dana Scully".to_string()),
///     avatar_url: None,
/// }).await?;
///
/// let found = Profile::find_by_email(pool, "dana@example.com").await?;
/// assert_eq!(found.map(|p| p.id), Some(profile.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Global role attached to every profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "profile_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    /// Full access including role administration
    Admin,

    /// Can create tasks and move them into done
    Manager,

    /// Default role; cannot complete or create tasks
    Member,
}

impl ProfileRole {
    /// Converts role to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Admin => "admin",
            ProfileRole::Manager => "manager",
            ProfileRole::Member => "member",
        }
    }

    /// Parses role from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(ProfileRole::Admin),
            "manager" => Some(ProfileRole::Manager),
            "member" => Some(ProfileRole::Member),
            _ => None,
        }
    }

    /// Whether this role may move a task into `done`
    pub fn can_complete_tasks(&self) -> bool {
        matches!(self, ProfileRole::Admin | ProfileRole::Manager)
    }

    /// Whether this role may create new tasks
    pub fn can_create_tasks(&self) -> bool {
        matches!(self, ProfileRole::Admin | ProfileRole::Manager)
    }

    /// Whether this role may change other users' roles
    pub fn can_manage_roles(&self) -> bool {
        matches!(self, ProfileRole::Admin)
    }
}

impl Default for ProfileRole {
    fn default() -> Self {
        ProfileRole::Member
    }
}

impl std::fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile model representing a user account
///
/// Passwords are stored as Argon2id hashes, never in plaintext, and the hash
/// never leaves the server (skipped on serialization).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    /// Unique profile ID (UUID v4)
    pub id: Uuid,

    /// Case-insensitive thanks to the CITEXT column
    pub email: String,

    /// Stored Argon2id hash, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name, if the user set one
    pub full_name: Option<String>,

    /// Avatar image URL, if the user set one
    pub avatar_url: Option<String>,

    /// Global role
    pub role: ProfileRole,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,

    /// When the user last logged in (None if never)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new profile
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub email: String,

    /// Already hashed; callers run the plaintext through `auth::password`
    pub password_hash: String,

    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Reduced projection served by the user roster endpoint
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileSummary {
    /// Profile ID
    pub id: Uuid,

    /// Display name
    pub full_name: Option<String>,

    /// Email address
    pub email: String,

    /// Global role
    pub role: ProfileRole,
}

impl Profile {
    /// Creates a new profile with the default role
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint) or
    /// the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateProfile) -> Result<Self, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (email, password_hash, full_name, avatar_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, full_name, avatar_url, role,
                      created_at, updated_at, last_login_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.full_name)
        .bind(data.avatar_url)
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, password_hash, full_name, avatar_url, role,
                   created_at, updated_at, last_login_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by email address (case-insensitive via CITEXT)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, password_hash, full_name, avatar_url, role,
                   created_at, updated_at, last_login_at
            FROM profiles
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Looks up just the role for a profile
    ///
    /// Authorization checks call this on hot paths; it avoids dragging the
    /// full row across the wire.
    pub async fn role_of(pool: &PgPool, id: Uuid) -> Result<Option<ProfileRole>, sqlx::Error> {
        let role: Option<ProfileRole> =
            sqlx::query_scalar("SELECT role FROM profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(role)
    }

    /// Lists all profiles for the user roster, ordered by display name
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<ProfileSummary>, sqlx::Error> {
        let profiles = sqlx::query_as::<_, ProfileSummary>(
            r#"
            SELECT id, full_name, email, role
            FROM profiles
            ORDER BY full_name NULLS LAST, email
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(profiles)
    }

    /// Changes a profile's global role
    ///
    /// Returns true if the profile existed and was updated.
    pub async fn update_role(
        pool: &PgPool,
        id: Uuid,
        role: ProfileRole,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(role)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Updates the last login timestamp after successful authentication
    pub async fn touch_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET last_login_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
