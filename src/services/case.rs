//! Case URN ↔ case ID resolution.

use crate::clients::system_id_mapper::CaseMapping;
use crate::clients::{DownstreamError, SystemIdMapperClient};

/// Discriminator the mapper expects for case-ID mappings.
const TARGET_TYPE_CASE_ID: &str = "CASE_ID";

#[derive(Debug, Clone)]
pub struct CaseService {
    mappings: SystemIdMapperClient,
}

impl CaseService {
    pub fn new(mappings: SystemIdMapperClient) -> Self {
        Self { mappings }
    }

    /// Resolve case IDs for comma-separated case URNs.
    pub async fn get_case_id_by_urn(
        &self,
        case_urns: &str,
        correlation_id: &str,
    ) -> Result<Vec<CaseMapping>, DownstreamError> {
        tracing::info!(case_urns = %case_urns, "Requesting case IDs for URNs");
        let result = self
            .mappings
            .get_mappings_by_case_urns(case_urns, TARGET_TYPE_CASE_ID, correlation_id)
            .await?;
        tracing::debug!(count = result.len(), case_urns = %case_urns, "Received mappings for URNs");
        Ok(result)
    }

    /// Resolve case URNs for comma-separated case IDs.
    pub async fn get_case_urn_by_case_id(
        &self,
        case_ids: &str,
        correlation_id: &str,
    ) -> Result<Vec<CaseMapping>, DownstreamError> {
        tracing::info!(case_ids = %case_ids, "Requesting case URNs for IDs");
        let result = self
            .mappings
            .get_mappings_by_case_ids(case_ids, TARGET_TYPE_CASE_ID, correlation_id)
            .await?;
        tracing::debug!(count = result.len(), case_ids = %case_ids, "Received mappings for IDs");
        Ok(result)
    }
}
