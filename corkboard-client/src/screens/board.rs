//! Kanban board screen for a single project.
//!
//! Holds the project header, its task cards, the member list, and the
//! viewer's own profile. Card moves and reassignments are optimistic;
//! the role gate for moving a card into `done` fires before any network
//! traffic so a member's drag is rejected instantly.

use uuid::Uuid;

use corkboard_shared::models::member::MemberWithProfile;
use corkboard_shared::models::profile::{ProfileRole, ProfileSummary};
use corkboard_shared::models::project::ProjectWithCreator;
use corkboard_shared::models::task::{CreateTask, TaskStatus, TaskWithAssignee};

use crate::api::{CorkboardClient, SessionProfile};
use crate::error::{ClientError, ErrorKind};
use crate::screens::Screen;

/// View-model for one project's board.
#[derive(Debug)]
pub struct ProjectBoard {
    client: CorkboardClient,
    project_id: i64,

    /// Project header, None until the first successful load.
    pub project: Option<ProjectWithCreator>,

    /// All task cards, in the server's creation order.
    pub tasks: Vec<TaskWithAssignee>,

    /// Project members for the assignee picker.
    pub members: Vec<MemberWithProfile>,

    /// The signed-in user's profile, None until the first successful load.
    pub viewer: Option<SessionProfile>,
}

impl ProjectBoard {
    pub fn new(client: CorkboardClient, project_id: i64) -> Self {
        Self {
            client,
            project_id,
            project: None,
            tasks: Vec::new(),
            members: Vec::new(),
            viewer: None,
        }
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    fn viewer_role(&self) -> Option<ProfileRole> {
        self.viewer.as_ref().map(|viewer| viewer.role)
    }

    /// Moves a card to another column.
    ///
    /// Moving into `done` is gated on the viewer's role before any request
    /// is sent; a rejected gate leaves the board untouched.
    pub async fn move_task(
        &mut self,
        task_id: i64,
        new_status: TaskStatus,
    ) -> Result<(), ClientError> {
        if new_status == TaskStatus::Done
            && !self.viewer_role().is_some_and(|role| role.can_complete_tasks())
        {
            return Err(ClientError::forbidden("Only managers can move tasks to done"));
        }

        let client = self.client.clone();
        self.attempt(
            move |board| {
                if let Some(task) = board.tasks.iter_mut().find(|task| task.id == task_id) {
                    task.status = new_status;
                }
            },
            async move { client.update_task_status(task_id, new_status).await },
        )
        .await
    }

    /// Reassigns a card; `None` unassigns it.
    ///
    /// The optimistic transform also patches the joined assignee name and
    /// email from the member list so the card renders correctly before the
    /// server confirms.
    pub async fn assign_task(
        &mut self,
        task_id: i64,
        assignee: Option<Uuid>,
    ) -> Result<(), ClientError> {
        let client = self.client.clone();
        self.attempt(
            move |board| {
                let joined = assignee.and_then(|id| {
                    board
                        .members
                        .iter()
                        .find(|member| member.user_id == id)
                        .map(|member| (member.full_name.clone(), member.email.clone()))
                });

                if let Some(task) = board.tasks.iter_mut().find(|task| task.id == task_id) {
                    task.assigned_to = assignee;
                    match joined {
                        Some((name, email)) => {
                            task.assignee_name = name;
                            task.assignee_email = Some(email);
                        }
                        None => {
                            task.assignee_name = None;
                            task.assignee_email = None;
                        }
                    }
                }
            },
            async move { client.update_task_assignment(task_id, assignee).await },
        )
        .await
    }

    /// Removes a card optimistically.
    pub async fn delete_task(&mut self, task_id: i64) -> Result<(), ClientError> {
        let client = self.client.clone();
        self.attempt(
            move |board| board.tasks.retain(|task| task.id != task_id),
            async move { client.delete_task(task_id).await },
        )
        .await
    }

    /// Creates a card in the `todo` column from just a title.
    ///
    /// No optimistic placeholder: the id and timestamps are server-generated,
    /// so the board reloads after the create instead of inventing a row.
    pub async fn quick_add(&mut self, title: &str) -> Result<(), ClientError> {
        if !self.viewer_role().is_some_and(|role| role.can_create_tasks()) {
            return Err(ClientError::forbidden("Only managers can create tasks"));
        }

        let client = self.client.clone();
        let new_task = CreateTask {
            project_id: self.project_id,
            title: title.to_string(),
            description: String::new(),
            assigned_to: None,
            deadline: None,
        };

        self.attempt(|_| {}, async move { client.create_task(new_task).await })
            .await?;

        self.load().await
    }

    /// Adds a user to the project, then reloads.
    ///
    /// A conflict means the membership already exists and is treated as
    /// success; the reload picks up the row either way.
    pub async fn add_member(&mut self, user_id: Uuid) -> Result<(), ClientError> {
        match self
            .client
            .add_project_member(self.project_id, user_id, "member")
            .await
        {
            Ok(()) => {}
            Err(err) if err.kind == ErrorKind::Conflict => {
                tracing::debug!(%user_id, "Member already present");
            }
            Err(err) => return Err(err),
        }

        self.load().await
    }

    /// Removes a user from the project, then reloads.
    pub async fn remove_member(&mut self, user_id: Uuid) -> Result<(), ClientError> {
        self.client
            .remove_project_member(self.project_id, user_id)
            .await?;
        self.load().await
    }

    /// Groups tasks into board columns, preserving server order within each.
    pub fn columns(&self) -> [(TaskStatus, Vec<&TaskWithAssignee>); 3] {
        TaskStatus::all().map(|status| {
            let cards = self
                .tasks
                .iter()
                .filter(|task| task.status == status)
                .collect();
            (status, cards)
        })
    }

    /// Users who are not yet members, for the member picker.
    pub fn available_profiles<'a>(
        &self,
        all_users: &'a [ProfileSummary],
    ) -> Vec<&'a ProfileSummary> {
        all_users
            .iter()
            .filter(|user| !self.members.iter().any(|member| member.user_id == user.id))
            .collect()
    }
}

impl Screen for ProjectBoard {
    async fn load(&mut self) -> Result<(), ClientError> {
        let viewer = self.client.my_profile().await?;
        let project = self.client.get_project(self.project_id).await?;
        let tasks = self.client.list_project_tasks(self.project_id).await?;
        let members = self.client.list_project_members(self.project_id).await?;

        self.viewer = Some(viewer);
        self.project = Some(project);
        self.tasks = tasks;
        self.members = members;

        Ok(())
    }
}
