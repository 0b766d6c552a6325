/// Row types and their queries, one module per table
///
/// - `profile`: accounts, with a global role (admin / manager / member)
/// - `project`: the boards that hold tasks
/// - `task`: kanban cards moving through todo / in-progress / done
/// - `comment`: discussion on a task, optionally with an attached image URL
/// - `member`: which profiles belong to which projects
///
/// Each module pairs a row struct with `Create*` / `Update*` input structs
/// and keeps all SQL for that table behind associated functions:
///
/// ```no_run
/// use corkboard_shared::models::task::{CreateTask, Task};
///
/// # async fn example(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
/// let card = Task::create(
///     pool,
///     CreateTask {
///         project_id: 1,
///         title: "Write release notes".to_string(),
///         description: String::new(),
///         assigned_to: None,
///         deadline: None,
///     },
/// )
/// .await?;
/// assert_eq!(card.project_id, 1);
/// # Ok(())
/// # }
/// ```
pub mod comment;
pub mod member;
pub mod profile;
pub mod project;
pub mod task;
