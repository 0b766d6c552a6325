/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Session endpoints (register, login, logout)
/// - `projects`: Project CRUD and membership management
/// - `tasks`: Task CRUD
/// - `comments`: Task comment threads
/// - `users`: Profile listing and role management

pub mod auth;
pub mod comments;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use serde::{Deserialize, Serialize};

/// Body returned by mutations that do not echo a resource back
///
/// ```json
/// { "success": true }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true; failures use the error body instead
    pub success: bool,
}

impl SuccessResponse {
    /// The canonical success body
    pub fn ok() -> Self {
        Self { success: true }
    }
}
