//! Project list screen.

use corkboard_shared::models::project::Project;

use crate::api::CorkboardClient;
use crate::error::ClientError;
use crate::screens::Screen;

/// View-model for the project overview.
#[derive(Debug)]
pub struct ProjectList {
    client: CorkboardClient,

    /// All projects, in the server's order.
    pub projects: Vec<Project>,
}

impl ProjectList {
    pub fn new(client: CorkboardClient) -> Self {
        Self {
            client,
            projects: Vec::new(),
        }
    }

    /// Creates a project, then reloads to pick up the server-assigned row.
    pub async fn create(&mut self, name: &str, description: &str) -> Result<(), ClientError> {
        let client = self.client.clone();
        let name = name.to_string();
        let description = description.to_string();

        self.attempt(|_| {}, async move {
            client.create_project(&name, &description).await
        })
        .await?;

        self.load().await
    }

    /// Removes a project optimistically.
    pub async fn remove(&mut self, project_id: i64) -> Result<(), ClientError> {
        let client = self.client.clone();
        self.attempt(
            move |list| list.projects.retain(|project| project.id != project_id),
            async move { client.delete_project(project_id).await },
        )
        .await
    }
}

impl Screen for ProjectList {
    async fn load(&mut self) -> Result<(), ClientError> {
        self.projects = self.client.list_projects().await?;
        Ok(())
    }
}
