/// Comment model and database operations
///
/// Comments hang off tasks. A comment may carry an `image_url` pointing at
/// an attachment the client uploaded to blob storage; the API only ever
/// stores the URL, never the bytes.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_comments (
///     id BIGSERIAL PRIMARY KEY,
///     task_id BIGINT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
///     content TEXT NOT NULL,
///     image_url VARCHAR(512),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID (serial)
    pub id: i64,

    /// Task this comment belongs to
    pub task_id: i64,

    /// Author profile
    pub user_id: Uuid,

    /// Comment body
    pub content: String,

    /// Optional attachment URL (already uploaded to blob storage)
    pub image_url: Option<String>,

    /// When the comment was posted
    pub created_at: DateTime<Utc>,
}

/// Comment row with the author's profile fields joined in
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    /// Unique comment ID
    pub id: i64,

    /// Task this comment belongs to
    pub task_id: i64,

    /// Author profile
    pub user_id: Uuid,

    /// Comment body
    pub content: String,

    /// Optional attachment URL
    pub image_url: Option<String>,

    /// When the comment was posted
    pub created_at: DateTime<Utc>,

    /// Author's display name
    pub author_name: Option<String>,

    /// Author's avatar URL
    pub author_avatar_url: Option<String>,
}

/// Input for creating a new comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    /// Task to comment on
    pub task_id: i64,

    /// Author profile (always the session user)
    pub user_id: Uuid,

    /// Comment body
    pub content: String,

    /// Optional attachment URL
    pub image_url: Option<String>,
}

impl Comment {
    /// Creates a new comment
    ///
    /// # Errors
    ///
    /// Returns an error if the task or author does not exist (FK violation)
    /// or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateComment) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO task_comments (task_id, user_id, content, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, task_id, user_id, content, image_url, created_at
            "#,
        )
        .bind(data.task_id)
        .bind(data.user_id)
        .bind(data.content)
        .bind(data.image_url)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Finds a comment by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, task_id, user_id, content, image_url, created_at
            FROM task_comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(comment)
    }

    /// Lists a task's comments oldest-first, with authors joined
    ///
    /// Ascending order matches how the thread renders: earliest at the top.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.task_id, c.user_id, c.content, c.image_url, c.created_at,
                   p.full_name AS author_name, p.avatar_url AS author_avatar_url
            FROM task_comments c
            LEFT JOIN profiles p ON p.id = c.user_id
            WHERE c.task_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }

    /// Deletes a comment
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
