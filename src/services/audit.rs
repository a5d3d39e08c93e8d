//! Audit enrichment: the one fan-out aggregation.

use serde::{Deserialize, Serialize};

use crate::clients::system_id_mapper::CaseMapping;
use crate::clients::user::User;
use crate::clients::{DownstreamError, SystemIdMapperClient, UserClient};

/// Combined result of the audit fan-out. Either half may legitimately
/// be empty; no not-found translation applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResponse {
    pub users: Vec<User>,
    pub mappings: Vec<CaseMapping>,
}

/// Resolves users and case mappings for one audit report.
#[derive(Debug, Clone)]
pub struct AuditService {
    users: UserClient,
    mappings: SystemIdMapperClient,
}

impl AuditService {
    pub fn new(users: UserClient, mappings: SystemIdMapperClient) -> Self {
        Self { users, mappings }
    }

    /// Independently resolve users (when `user_ids` is non-empty) and
    /// case mappings (when `case_urns` is non-empty). An empty input
    /// list skips its downstream call entirely and contributes an empty
    /// half. The two calls run concurrently; they are independent and
    /// failure-isolated.
    pub async fn get_enriched_audit(
        &self,
        user_ids: &[String],
        case_urns: &[String],
        target_type: &str,
        correlation_id: &str,
    ) -> Result<AuditResponse, DownstreamError> {
        let users_half = async {
            if user_ids.is_empty() {
                Ok(Vec::new())
            } else {
                self.users
                    .get_users(&user_ids.join(","), correlation_id)
                    .await
            }
        };

        let mappings_half = async {
            if case_urns.is_empty() {
                Ok(Vec::new())
            } else {
                self.mappings
                    .get_mappings_by_case_urns(&case_urns.join(","), target_type, correlation_id)
                    .await
            }
        };

        let (users, mappings) = tokio::try_join!(users_half, mappings_half)?;
        Ok(AuditResponse { users, mappings })
    }
}
