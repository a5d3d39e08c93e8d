//! User lookups against the identity directory.

use crate::clients::user::User;
use crate::clients::{DownstreamError, UserClient};

#[derive(Debug, Clone)]
pub struct UserService {
    users: UserClient,
}

impl UserService {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    /// Look up users by comma-separated email addresses.
    pub async fn get_users_by_emails(
        &self,
        emails: &str,
        correlation_id: &str,
    ) -> Result<Vec<User>, DownstreamError> {
        tracing::info!(emails = %emails, "Requesting users for emails");
        let result = self.users.get_users_by_email(emails, correlation_id).await?;
        tracing::debug!(count = result.len(), emails = %emails, "Received users for emails");
        Ok(result)
    }

    /// Look up users by comma-separated user IDs.
    pub async fn get_users_by_ids(
        &self,
        user_ids: &str,
        correlation_id: &str,
    ) -> Result<Vec<User>, DownstreamError> {
        tracing::info!(user_ids = %user_ids, "Requesting users for IDs");
        let result = self.users.get_users(user_ids, correlation_id).await?;
        tracing::debug!(count = result.len(), user_ids = %user_ids, "Received users for IDs");
        Ok(result)
    }
}
