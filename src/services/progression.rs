//! Material-case lookups against the progression service.

use crate::clients::progression::MaterialCase;
use crate::clients::{DownstreamError, ProgressionClient};

#[derive(Debug, Clone)]
pub struct ProgressionService {
    progression: ProgressionClient,
}

impl ProgressionService {
    pub fn new(progression: ProgressionClient) -> Self {
        Self { progression }
    }

    /// Look up material cases by comma-separated material IDs.
    pub async fn get_material_cases(
        &self,
        material_ids: &str,
        correlation_id: &str,
    ) -> Result<Vec<MaterialCase>, DownstreamError> {
        tracing::info!(material_ids = %material_ids, "Requesting material cases");
        let result = self
            .progression
            .get_material_cases(material_ids, correlation_id)
            .await?;
        tracing::debug!(count = result.len(), material_ids = %material_ids, "Received material cases");
        Ok(result)
    }
}
