/// Task model and database operations
///
/// Tasks are the kanban cards. Status is a three-column flow with no
/// enforced transition order; what is enforced (at the API layer) is WHO may
/// move a card into `done` or create one at all.
///
/// ```text
/// todo ⇄ in-progress ⇄ done
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in-progress', 'done');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status task_status NOT NULL DEFAULT 'todo',
///     assigned_to UUID REFERENCES profiles(id) ON DELETE SET NULL,
///     deadline DATE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::models::task::{Task, CreateTask};
/// use corkboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     project_id: 1,
///     title: "Wire up the login page".to_string(),
///     description: String::new(),
///     assigned_to: None,
///     deadline: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Kanban column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    Todo,

    /// Being worked on
    InProgress,

    /// Finished; entering this column is role-gated
    Done,
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Parses status from its wire string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in-progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// All statuses in board column order
    pub fn all() -> [TaskStatus; 3] {
        [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done]
    }

    /// Whether the task counts toward a project's completed total
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

/// Task model representing a kanban card
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (serial)
    pub id: i64,

    /// Project this task belongs to
    pub project_id: i64,

    /// Card title
    pub title: String,

    /// Longer description (empty string when not provided)
    pub description: String,

    /// Current board column
    pub status: TaskStatus,

    /// Assigned profile (null when unassigned or the assignee was deleted)
    pub assigned_to: Option<Uuid>,

    /// Optional due date
    pub deadline: Option<NaiveDate>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Task row with the assignee's profile fields joined in
///
/// The list and detail endpoints both serve this shape so the board can
/// render assignee names without a second request.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithAssignee {
    /// Unique task ID
    pub id: i64,

    /// Project this task belongs to
    pub project_id: i64,

    /// Card title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Current board column
    pub status: TaskStatus,

    /// Assigned profile
    pub assigned_to: Option<Uuid>,

    /// Optional due date
    pub deadline: Option<NaiveDate>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,

    /// Assignee's display name, if assigned
    pub assignee_name: Option<String>,

    /// Assignee's email, if assigned
    pub assignee_email: Option<String>,
}

/// Input for creating a new task
///
/// Status is not accepted here: new tasks always start in `todo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Project the task belongs to
    pub project_id: i64,

    /// Card title
    pub title: String,

    /// Description (empty string is fine)
    #[serde(default)]
    pub description: String,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,

    /// Optional due date
    pub deadline: Option<NaiveDate>,
}

/// Input for partially updating a task
///
/// Only non-None fields are written. `assigned_to` and `deadline` use a
/// double Option so an explicit JSON null clears the column while an absent
/// field leaves it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New board column
    pub status: Option<TaskStatus>,

    /// New assignee (Some(None) unassigns)
    #[serde(
        default,
        deserialize_with = "deserialize_clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_to: Option<Option<Uuid>>,

    /// New due date (Some(None) clears)
    #[serde(
        default,
        deserialize_with = "deserialize_clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<Option<NaiveDate>>,
}

/// Maps an absent field to None and an explicit null to Some(None)
fn deserialize_clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateTask {
    /// True when no field is set (nothing to write)
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
            && self.deadline.is_none()
    }
}

impl Task {
    /// Creates a new task in the `todo` column
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not exist (FK violation) or the
    /// database operation fails.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, description, assigned_to, deadline)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, project_id, title, description, status, assigned_to, deadline,
                      created_at, updated_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.assigned_to)
        .bind(data.deadline)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, description, status, assigned_to, deadline,
                   created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID with the assignee joined in
    pub async fn find_by_id_with_assignee(
        pool: &PgPool,
        id: i64,
    ) -> Result<Option<TaskWithAssignee>, sqlx::Error> {
        let task = sqlx::query_as::<_, TaskWithAssignee>(
            r#"
            SELECT t.id, t.project_id, t.title, t.description, t.status, t.assigned_to,
                   t.deadline, t.created_at, t.updated_at,
                   p.full_name AS assignee_name, p.email AS assignee_email
            FROM tasks t
            LEFT JOIN profiles p ON p.id = t.assigned_to
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks with assignees joined, optionally filtered by project
    ///
    /// Ordered by creation time so board columns keep a stable order.
    pub async fn list_with_assignee(
        pool: &PgPool,
        project_id: Option<i64>,
    ) -> Result<Vec<TaskWithAssignee>, sqlx::Error> {
        let tasks = match project_id {
            Some(project_id) => {
                sqlx::query_as::<_, TaskWithAssignee>(
                    r#"
                    SELECT t.id, t.project_id, t.title, t.description, t.status, t.assigned_to,
                           t.deadline, t.created_at, t.updated_at,
                           p.full_name AS assignee_name, p.email AS assignee_email
                    FROM tasks t
                    LEFT JOIN profiles p ON p.id = t.assigned_to
                    WHERE t.project_id = $1
                    ORDER BY t.created_at ASC, t.id ASC
                    "#,
                )
                .bind(project_id)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TaskWithAssignee>(
                    r#"
                    SELECT t.id, t.project_id, t.title, t.description, t.status, t.assigned_to,
                           t.deadline, t.created_at, t.updated_at,
                           p.full_name AS assignee_name, p.email AS assignee_email
                    FROM tasks t
                    LEFT JOIN profiles p ON p.id = t.assigned_to
                    ORDER BY t.created_at ASC, t.id ASC
                    "#,
                )
                .fetch_all(pool)
                .await?
            }
        };

        Ok(tasks)
    }

    /// Partially updates a task
    ///
    /// Builds the SET clause from the fields present in `data`. Returns the
    /// updated row, or None if the task does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if data.assigned_to.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assigned_to = ${}", bind_count));
        }
        if data.deadline.is_some() {
            bind_count += 1;
            query.push_str(&format!(", deadline = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, project_id, title, description, status, \
             assigned_to, deadline, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(assigned_to) = data.assigned_to {
            q = q.bind(assigned_to);
        }
        if let Some(deadline) = data.deadline {
            q = q.bind(deadline);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Also deletes its comments via CASCADE.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
