//! Typed facade over the gateway's JSON endpoints.
//!
//! One method per endpoint; every method resolves to either a fully decoded
//! response body or a [`ClientError`]. Session handling is transparent: the
//! underlying `reqwest` client carries the session cookie set by
//! [`CorkboardClient::login`] on every subsequent request.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use corkboard_shared::models::comment::{Comment, CommentWithAuthor};
use corkboard_shared::models::member::MemberWithProfile;
use corkboard_shared::models::profile::{ProfileRole, ProfileSummary};
use corkboard_shared::models::project::{Project, ProjectWithCreator};
use corkboard_shared::models::task::{CreateTask, Task, TaskStatus, TaskWithAssignee};

use crate::error::{ClientError, ErrorKind};

/// The signed-in user's profile as served by the auth and `/users/me`
/// endpoints. The gateway never serializes the password hash, so this is
/// the complete client-side view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: ProfileRole,
}

/// Error body served by the gateway on every non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client facade for the Corkboard gateway and file store.
///
/// Cheap to clone; clones share the same connection pool and cookie jar.
#[derive(Debug, Clone)]
pub struct CorkboardClient {
    pub(crate) http: reqwest::Client,
    pub(crate) api_base: String,
    pub(crate) storage_base: String,
}

impl CorkboardClient {
    /// Builds a client against the given gateway and file store base URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        api_base: impl Into<String>,
        storage_base: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::ClientBuilder::new().cookie_store(true).build()?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            storage_base: storage_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Resolves a response to () or the gateway's error.
    pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Prefer the gateway's own message; fall back to the status line
        // when the body is not the expected error shape.
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };

        tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        Err(ClientError::new(ErrorKind::from_status(status), message))
    }

    async fn expect_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn expect_ok(response: reqwest::Response) -> Result<(), ClientError> {
        Self::check(response).await.map(|_| ())
    }

    // ---- Auth ----

    /// Registers a new account and starts a session.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<SessionProfile, ClientError> {
        let body = json!({
            "email": email,
            "password": password,
            "full_name": full_name,
        });
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&body)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    /// Logs in and stores the session cookie for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionProfile, ClientError> {
        let body = json!({ "email": email, "password": password });
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    /// Ends the current session.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.url("/auth/logout")).send().await?;
        Self::expect_ok(response).await
    }

    // ---- Projects ----

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self.http.get(self.url("/projects")).send().await?;
        Self::expect_json(response).await
    }

    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Project, ClientError> {
        let body = json!({ "name": name, "description": description });
        let response = self
            .http
            .post(self.url("/projects"))
            .json(&body)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn get_project(&self, project_id: i64) -> Result<ProjectWithCreator, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/projects/{}", project_id)))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn delete_project(&self, project_id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/projects/{}", project_id)))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    // ---- Memberships ----

    pub async fn list_project_members(
        &self,
        project_id: i64,
    ) -> Result<Vec<MemberWithProfile>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/projects/{}/members", project_id)))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn add_project_member(
        &self,
        project_id: i64,
        user_id: Uuid,
        role: &str,
    ) -> Result<(), ClientError> {
        let body = json!({ "user_id": user_id, "role": role });
        let response = self
            .http
            .post(self.url(&format!("/projects/{}/members", project_id)))
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    pub async fn remove_project_member(
        &self,
        project_id: i64,
        user_id: Uuid,
    ) -> Result<(), ClientError> {
        let body = json!({ "user_id": user_id });
        let response = self
            .http
            .delete(self.url(&format!("/projects/{}/members", project_id)))
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    // ---- Tasks ----

    pub async fn list_project_tasks(
        &self,
        project_id: i64,
    ) -> Result<Vec<TaskWithAssignee>, ClientError> {
        let response = self
            .http
            .get(self.url("/tasks"))
            .query(&[("project_id", project_id)])
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_task(&self, new_task: CreateTask) -> Result<Task, ClientError> {
        let response = self
            .http
            .post(self.url("/tasks"))
            .json(&new_task)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn get_task(&self, task_id: i64) -> Result<TaskWithAssignee, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/tasks/{}", task_id)))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    /// Moves a task to another board column via a partial update.
    pub async fn update_task_status(
        &self,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<(), ClientError> {
        let body = json!({ "status": status });
        let response = self
            .http
            .put(self.url(&format!("/tasks/{}", task_id)))
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    /// Reassigns a task. `None` sends an explicit null, which unassigns.
    pub async fn update_task_assignment(
        &self,
        task_id: i64,
        assigned_to: Option<Uuid>,
    ) -> Result<(), ClientError> {
        let body = json!({ "assigned_to": assigned_to });
        let response = self
            .http
            .put(self.url(&format!("/tasks/{}", task_id)))
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/tasks/{}", task_id)))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    // ---- Comments ----

    pub async fn list_task_comments(
        &self,
        task_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/tasks/{}/comments", task_id)))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn add_task_comment(
        &self,
        task_id: i64,
        content: &str,
        image_url: Option<String>,
    ) -> Result<Comment, ClientError> {
        let body = json!({ "content": content, "image_url": image_url });
        let response = self
            .http
            .post(self.url(&format!("/tasks/{}/comments", task_id)))
            .json(&body)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/comments/{}", comment_id)))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    // ---- Users ----

    pub async fn list_users(&self) -> Result<Vec<ProfileSummary>, ClientError> {
        let response = self.http.get(self.url("/users")).send().await?;
        Self::expect_json(response).await
    }

    pub async fn my_profile(&self) -> Result<SessionProfile, ClientError> {
        let response = self.http.get(self.url("/users/me")).send().await?;
        Self::expect_json(response).await
    }

    pub async fn update_profile_role(
        &self,
        user_id: Uuid,
        role: ProfileRole,
    ) -> Result<(), ClientError> {
        let body = json!({ "role": role });
        let response = self
            .http
            .put(self.url(&format!("/users/{}/role", user_id)))
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }
}
