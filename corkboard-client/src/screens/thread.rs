//! Task detail screen with its comment thread.

use bytes::Bytes;
use uuid::Uuid;

use corkboard_shared::models::comment::CommentWithAuthor;
use corkboard_shared::models::task::TaskWithAssignee;

use crate::api::CorkboardClient;
use crate::error::{ClientError, ErrorKind};
use crate::screens::Screen;

/// A file picked for upload alongside a comment.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub bytes: Bytes,
}

/// View-model for one task's detail view.
#[derive(Debug)]
pub struct CommentThread {
    client: CorkboardClient,
    task_id: i64,

    /// The task, None until the first successful load.
    pub task: Option<TaskWithAssignee>,

    /// Comments ascending by creation time.
    pub comments: Vec<CommentWithAuthor>,

    /// The signed-in user's id, for the delete gate.
    pub viewer_id: Option<Uuid>,
}

impl CommentThread {
    pub fn new(client: CorkboardClient, task_id: i64) -> Self {
        Self {
            client,
            task_id,
            task: None,
            comments: Vec::new(),
            viewer_id: None,
        }
    }

    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    /// Posts a comment, uploading the attachment first when one is given.
    ///
    /// Comment ids and timestamps are server-generated, so there is no
    /// optimistic row; the thread reloads after the create.
    pub async fn post(
        &mut self,
        content: &str,
        attachment: Option<Attachment>,
    ) -> Result<(), ClientError> {
        let viewer_id = self
            .viewer_id
            .ok_or_else(|| ClientError::new(ErrorKind::Auth, "Not signed in"))?;

        let image_url = match attachment {
            Some(attachment) => Some(
                self.client
                    .upload_attachment(viewer_id, &attachment.filename, attachment.bytes)
                    .await?,
            ),
            None => None,
        };

        let client = self.client.clone();
        let task_id = self.task_id;
        let content = content.to_string();

        self.attempt(|_| {}, async move {
            client.add_task_comment(task_id, &content, image_url).await
        })
        .await?;

        self.load().await
    }

    /// Deletes a comment, then reloads the thread.
    pub async fn delete_comment(&mut self, comment_id: i64) -> Result<(), ClientError> {
        self.client.delete_comment(comment_id).await?;
        self.load().await
    }

    /// Whether the viewer may delete this comment (authors only).
    pub fn can_delete(&self, comment: &CommentWithAuthor) -> bool {
        self.viewer_id == Some(comment.user_id)
    }
}

impl Screen for CommentThread {
    async fn load(&mut self) -> Result<(), ClientError> {
        let viewer = self.client.my_profile().await?;
        let task = self.client.get_task(self.task_id).await?;
        let comments = self.client.list_task_comments(self.task_id).await?;

        self.viewer_id = Some(viewer.id);
        self.task = Some(task);
        self.comments = comments;

        Ok(())
    }
}
