//! Identity directory client (users/groups query API).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::clients::{ensure_success, outbound_headers, DownstreamError};
use crate::config::CqrsConfig;

/// Identity record returned by the users/groups query API.
///
/// The upstream has historically served both `id` and `userId`; this
/// crate emits `id` and accepts either on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, alias = "userId")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    users: Option<Vec<User>>,
}

/// Client for the users/groups query API.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: reqwest::Client,
    base_url: String,
    path: String,
    accept: String,
    cjs_cppuid: String,
}

impl UserClient {
    pub fn new(http: reqwest::Client, config: &CqrsConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            path: config.users.path.clone(),
            accept: config.users.accept.clone(),
            cjs_cppuid: config.cjs_cppuid.clone(),
        }
    }

    /// Look up users by comma-separated user IDs.
    pub async fn get_users(
        &self,
        user_ids: &str,
        correlation_id: &str,
    ) -> Result<Vec<User>, DownstreamError> {
        tracing::debug!(user_ids = %user_ids, "Calling user service for user IDs");
        let result = self.fetch(&[("userIds", user_ids)], correlation_id).await;
        match &result {
            Ok(users) => {
                tracing::debug!(count = users.len(), user_ids = %user_ids, "Retrieved users")
            }
            Err(e) => {
                tracing::error!(user_ids = %user_ids, error = %e, "Error calling user service")
            }
        }
        result
    }

    /// Look up users by comma-separated email addresses.
    pub async fn get_users_by_email(
        &self,
        emails: &str,
        correlation_id: &str,
    ) -> Result<Vec<User>, DownstreamError> {
        tracing::debug!(emails = %emails, "Calling user service for emails");
        let result = self.fetch(&[("emails", emails)], correlation_id).await;
        match &result {
            Ok(users) => tracing::debug!(count = users.len(), emails = %emails, "Retrieved users"),
            Err(e) => tracing::error!(emails = %emails, error = %e, "Error calling user service"),
        }
        result
    }

    async fn fetch(
        &self,
        query: &[(&str, &str)],
        correlation_id: &str,
    ) -> Result<Vec<User>, DownstreamError> {
        let url = Url::parse_with_params(&format!("{}{}", self.base_url, self.path), query)?;
        let headers = outbound_headers(&self.cjs_cppuid, correlation_id, Some(&self.accept))?;

        let response = self.http.get(url).headers(headers).send().await?;
        ensure_success(response.status())?;

        let envelope: Option<UserEnvelope> = response.json().await?;
        Ok(envelope.and_then(|e| e.users).unwrap_or_default())
    }
}
