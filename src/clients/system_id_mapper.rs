//! System-id mapper client (case URN ↔ case ID mappings).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::clients::{ensure_success, outbound_headers, DownstreamError};
use crate::config::CqrsConfig;

/// One URN-to-ID mapping. Direction is inferred from which query
/// parameter produced it, not from a field.
///
/// Emits `caseUrn`/`caseId`; accepts the upstream's `sourceId`/`targetId`
/// as input aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseMapping {
    #[serde(default, alias = "sourceId")]
    pub case_urn: Option<String>,
    #[serde(default, alias = "targetId")]
    pub case_id: Option<String>,
    #[serde(default)]
    pub target_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SystemIdEnvelope {
    #[serde(default, rename = "systemIds")]
    system_ids: Option<Vec<CaseMapping>>,
}

/// Client for the system-id mapper bulk mappings API.
#[derive(Debug, Clone)]
pub struct SystemIdMapperClient {
    http: reqwest::Client,
    base_url: String,
    path: String,
    accept: String,
    cjs_cppuid: String,
}

impl SystemIdMapperClient {
    pub fn new(http: reqwest::Client, config: &CqrsConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            path: config.system_id_mapper.path.clone(),
            accept: config.system_id_mapper.accept.clone(),
            cjs_cppuid: config.cjs_cppuid.clone(),
        }
    }

    /// Resolve case IDs for comma-separated case URNs.
    pub async fn get_mappings_by_case_urns(
        &self,
        case_urns: &str,
        target_type: &str,
        correlation_id: &str,
    ) -> Result<Vec<CaseMapping>, DownstreamError> {
        tracing::debug!(case_urns = %case_urns, target_type = %target_type, "Calling system-id mapper for case URNs");
        let result = self
            .fetch(
                &[("sourceIds", case_urns), ("targetType", target_type)],
                correlation_id,
            )
            .await;
        match &result {
            Ok(mappings) => {
                tracing::debug!(count = mappings.len(), case_urns = %case_urns, "Retrieved mappings")
            }
            Err(e) => {
                tracing::error!(case_urns = %case_urns, error = %e, "Error calling system-id mapper")
            }
        }
        result
    }

    /// Resolve case URNs for comma-separated case IDs.
    pub async fn get_mappings_by_case_ids(
        &self,
        case_ids: &str,
        target_type: &str,
        correlation_id: &str,
    ) -> Result<Vec<CaseMapping>, DownstreamError> {
        tracing::debug!(case_ids = %case_ids, target_type = %target_type, "Calling system-id mapper for case IDs");
        let result = self
            .fetch(
                &[("targetIds", case_ids), ("targetType", target_type)],
                correlation_id,
            )
            .await;
        match &result {
            Ok(mappings) => {
                tracing::debug!(count = mappings.len(), case_ids = %case_ids, "Retrieved mappings")
            }
            Err(e) => {
                tracing::error!(case_ids = %case_ids, error = %e, "Error calling system-id mapper")
            }
        }
        result
    }

    async fn fetch(
        &self,
        query: &[(&str, &str)],
        correlation_id: &str,
    ) -> Result<Vec<CaseMapping>, DownstreamError> {
        let url = Url::parse_with_params(&format!("{}{}", self.base_url, self.path), query)?;
        let headers = outbound_headers(&self.cjs_cppuid, correlation_id, Some(&self.accept))?;

        let response = self.http.get(url).headers(headers).send().await?;
        ensure_success(response.status())?;

        let envelope: Option<SystemIdEnvelope> = response.json().await?;
        Ok(envelope.and_then(|e| e.system_ids).unwrap_or_default())
    }
}
