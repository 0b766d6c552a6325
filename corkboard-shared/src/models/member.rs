/// Project membership model and database operations
///
/// Many-to-many relation between projects and profiles. The `role` column
/// here is the per-project label ("member" by default); it is informational
/// and distinct from the global `ProfileRole` that gates board actions.
///
/// Adding a member is idempotent at the database level: the insert uses
/// `ON CONFLICT DO NOTHING` so re-adding an existing member is a no-op
/// rather than an error.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE project_members (
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
///     role VARCHAR(50) NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (project_id, user_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::models::member::ProjectMember;
/// use corkboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let user_id = Uuid::new_v4();
///
/// let inserted = ProjectMember::add(&pool, 1, user_id, "member").await?;
/// let again = ProjectMember::add(&pool, 1, user_id, "member").await?;
/// assert!(inserted || !again); // second add is a silent no-op
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Membership row (composite key: project_id + user_id)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMember {
    /// Project
    pub project_id: i64,

    /// Member profile
    pub user_id: Uuid,

    /// Per-project role label
    pub role: String,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

/// Membership row with the member's profile fields joined in
///
/// The members endpoint serves this flat shape so clients get the profile
/// id, name, and email in one row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberWithProfile {
    /// Project
    pub project_id: i64,

    /// Member profile
    pub user_id: Uuid,

    /// Per-project role label
    pub role: String,

    /// When the membership was created
    pub created_at: DateTime<Utc>,

    /// Member's display name
    pub full_name: Option<String>,

    /// Member's email
    pub email: String,
}

impl ProjectMember {
    /// Adds a profile to a project (idempotent)
    ///
    /// Returns true if a row was inserted, false if the membership already
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the project or profile does not exist (FK
    /// violation) or the database operation fails.
    pub async fn add(
        pool: &PgPool,
        project_id: i64,
        user_id: Uuid,
        role: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO project_members (project_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id, user_id) DO NOTHING
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes a profile from a project
    ///
    /// Returns true if a membership row was deleted.
    pub async fn remove(pool: &PgPool, project_id: i64, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether a profile is a member of a project
    pub async fn is_member(
        pool: &PgPool,
        project_id: i64,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM project_members
                WHERE project_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Lists a project's members with profiles joined, oldest membership first
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: i64,
    ) -> Result<Vec<MemberWithProfile>, sqlx::Error> {
        let members = sqlx::query_as::<_, MemberWithProfile>(
            r#"
            SELECT m.project_id, m.user_id, m.role, m.created_at,
                   p.full_name, p.email
            FROM project_members m
            JOIN profiles p ON p.id = m.user_id
            WHERE m.project_id = $1
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }
}
