//! Per-screen view-models.
//!
//! Each screen owns a [`CorkboardClient`](crate::api::CorkboardClient)
//! handle and the collections it renders. Local state only changes in two
//! ways: a full replace from the server ([`Screen::load`]) or an optimistic
//! transform whose remote call is reconciled by [`Screen::attempt`]. There
//! is no local undo; a failed mutation forces a refetch so the screen shows
//! the server's truth again.

use std::future::Future;

use crate::error::ClientError;

pub mod board;
pub mod dashboard;
pub mod projects;
pub mod roster;
pub mod thread;

pub use board::ProjectBoard;
pub use dashboard::{Dashboard, ProjectSummary};
pub use projects::ProjectList;
pub use roster::UserRoster;
pub use thread::{Attachment, CommentThread};

/// Shared reconciliation behavior for all screens.
#[allow(async_fn_in_trait)]
pub trait Screen {
    /// Refetches everything the screen shows and replaces local state.
    ///
    /// On failure local state is left unchanged and the error is surfaced.
    async fn load(&mut self) -> Result<(), ClientError>;

    /// Applies `transform` to local state, then awaits the remote call.
    ///
    /// If the remote call fails, the screen is reloaded from the server so
    /// the optimistic change never outlives its rejection, and the remote
    /// error is returned. A reload failure on top of that is logged but the
    /// caller still sees the original error.
    async fn attempt<T>(
        &mut self,
        transform: impl FnOnce(&mut Self),
        remote: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<(), ClientError> {
        transform(self);

        if let Err(err) = remote.await {
            tracing::warn!(error = %err, "Mutation rejected, reloading from server");
            if let Err(reload_err) = self.load().await {
                tracing::warn!(error = %reload_err, "Reload after rejected mutation failed");
            }
            return Err(err);
        }

        Ok(())
    }
}
