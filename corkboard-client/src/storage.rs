//! Attachment uploads to the file store.
//!
//! The file store is a plain HTTP object endpoint: a PUT to
//! `{storage_base}/files/{user_id}/{filename}` stores the bytes and the same
//! URL serves them back. Object keys are namespaced by the uploader's
//! profile id so two users uploading `photo.png` never collide.

use bytes::Bytes;
use uuid::Uuid;

use crate::api::CorkboardClient;
use crate::error::ClientError;

/// Replaces every character outside the object-key safe set with `_`.
///
/// The safe set is alphanumerics plus `! - _ . * ' ( )`. Anything else,
/// including spaces, path separators, and non-ASCII, becomes an underscore,
/// so the original filename's shape stays recognizable in the URL.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '0'..='9' | 'a'..='z' | 'A'..='Z' => c,
            '!' | '-' | '_' | '.' | '*' | '\'' | '(' | ')' => c,
            _ => '_',
        })
        .collect()
}

impl CorkboardClient {
    /// Uploads attachment bytes to the file store.
    ///
    /// Returns the public URL of the stored object, suitable for a
    /// comment's `image_url`.
    pub async fn upload_attachment(
        &self,
        user_id: Uuid,
        filename: &str,
        bytes: Bytes,
    ) -> Result<String, ClientError> {
        let object_url = format!(
            "{}/files/{}/{}",
            self.storage_base,
            user_id,
            sanitize_filename(filename)
        );

        tracing::debug!(url = %object_url, size = bytes.len(), "Uploading attachment");

        let response = self.http.put(&object_url).body(bytes).send().await?;
        Self::check(response).await?;

        Ok(object_url)
    }
}
