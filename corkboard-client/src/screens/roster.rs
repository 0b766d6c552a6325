//! User roster screen for role administration.

use uuid::Uuid;

use corkboard_shared::models::profile::{ProfileRole, ProfileSummary};

use crate::api::CorkboardClient;
use crate::error::ClientError;
use crate::screens::Screen;

/// View-model for the all-users roster.
#[derive(Debug)]
pub struct UserRoster {
    client: CorkboardClient,

    /// Every profile in the system.
    pub profiles: Vec<ProfileSummary>,
}

impl UserRoster {
    pub fn new(client: CorkboardClient) -> Self {
        Self {
            client,
            profiles: Vec::new(),
        }
    }

    /// Changes a user's global role.
    ///
    /// Not optimistic: the local row is only updated after the server
    /// accepts the change, so a rejected change never flashes a wrong role.
    pub async fn change_role(
        &mut self,
        user_id: Uuid,
        role: ProfileRole,
    ) -> Result<(), ClientError> {
        if let Err(err) = self.client.update_profile_role(user_id, role).await {
            tracing::warn!(%user_id, error = %err, "Role change rejected");
            return Err(err);
        }

        if let Some(profile) = self.profiles.iter_mut().find(|profile| profile.id == user_id) {
            profile.role = role;
        }

        Ok(())
    }
}

impl Screen for UserRoster {
    async fn load(&mut self) -> Result<(), ClientError> {
        self.profiles = self.client.list_users().await?;
        Ok(())
    }
}
