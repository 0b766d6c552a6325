//! Cross-project progress dashboard.

use corkboard_shared::models::project::Project;

use crate::api::CorkboardClient;
use crate::error::ClientError;
use crate::screens::Screen;

/// One project's progress figures.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub project: Project,

    /// Total number of tasks.
    pub total: usize,

    /// Tasks in the `done` column.
    pub completed: usize,

    /// Rounded completion percentage, 0 for an empty project.
    pub progress_pct: u8,
}

/// View-model for the dashboard screen.
#[derive(Debug)]
pub struct Dashboard {
    client: CorkboardClient,

    /// Per-project summaries, in project list order.
    pub summaries: Vec<ProjectSummary>,
}

impl Dashboard {
    pub fn new(client: CorkboardClient) -> Self {
        Self {
            client,
            summaries: Vec::new(),
        }
    }
}

impl Screen for Dashboard {
    /// Lists projects, then fetches each project's tasks one at a time and
    /// reduces them to counts. The summaries are only committed once every
    /// fetch has succeeded.
    async fn load(&mut self) -> Result<(), ClientError> {
        let projects = self.client.list_projects().await?;

        let mut summaries = Vec::with_capacity(projects.len());
        for project in projects {
            let tasks = self.client.list_project_tasks(project.id).await?;
            let total = tasks.len();
            let completed = tasks.iter().filter(|task| task.status.is_done()).count();

            summaries.push(ProjectSummary {
                progress_pct: progress_pct(completed, total),
                project,
                total,
                completed,
            });
        }

        self.summaries = summaries;
        Ok(())
    }
}

fn progress_pct(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as u8
}
