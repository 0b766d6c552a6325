/// Project model and database operations
///
/// Projects are the top-level containers: tasks and memberships hang off a
/// project, and deleting one cascades to both.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     created_by UUID REFERENCES profiles(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::models::project::{Project, CreateProject};
/// use corkboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let project = Project::create(&pool, CreateProject {
///     name: "Website Redesign".to_string(),
///     description: "Q3 refresh of the marketing site".to_string(),
///     created_by: Some(Uuid::new_v4()),
/// }).await?;
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID (serial)
    pub id: i64,

    /// Project name
    pub name: String,

    /// Free-form description (empty string when not provided)
    pub description: String,

    /// Profile that created the project (null if that account was deleted)
    pub created_by: Option<Uuid>,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Project row with the creator's display name joined in
///
/// Served by the single-project endpoint; the list endpoint stays flat.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectWithCreator {
    /// Unique project ID
    pub id: i64,

    /// Project name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Profile that created the project
    pub created_by: Option<Uuid>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// Creator's display name, if the creator still exists
    pub creator_name: Option<String>,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Description (empty string is fine)
    pub description: String,

    /// Creating profile
    pub created_by: Option<Uuid>,
}

impl Project {
    /// Creates a new project
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_by, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.created_by)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, created_by, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID with the creator's name joined in
    pub async fn find_by_id_with_creator(
        pool: &PgPool,
        id: i64,
    ) -> Result<Option<ProjectWithCreator>, sqlx::Error> {
        let project = sqlx::query_as::<_, ProjectWithCreator>(
            r#"
            SELECT p.id, p.name, p.description, p.created_by, p.created_at,
                   pr.full_name AS creator_name
            FROM projects p
            LEFT JOIN profiles pr ON pr.id = p.created_by
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects, newest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, created_by, created_at
            FROM projects
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Deletes a project
    ///
    /// Cascades to the project's tasks (and their comments) and memberships.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
