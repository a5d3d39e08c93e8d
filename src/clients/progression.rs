//! Progression service client (case materials).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::clients::{ensure_success, outbound_headers, DownstreamError};
use crate::config::CqrsConfig;

/// A material-to-case association. Any field may be absent in the
/// upstream response; that is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCase {
    #[serde(default)]
    pub material_id: Option<String>,
    #[serde(default)]
    pub court_document_id: Option<String>,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub case_urn: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MaterialEnvelope {
    #[serde(default, rename = "materialIds")]
    material_ids: Option<Vec<MaterialCase>>,
}

/// Client for the progression materials query API.
#[derive(Debug, Clone)]
pub struct ProgressionClient {
    http: reqwest::Client,
    base_url: String,
    path: String,
    accept: String,
    cjs_cppuid: String,
}

impl ProgressionClient {
    pub fn new(http: reqwest::Client, config: &CqrsConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            path: config.progression.path.clone(),
            accept: config.progression.accept.clone(),
            cjs_cppuid: config.cjs_cppuid.clone(),
        }
    }

    /// Look up material cases by comma-separated material IDs.
    pub async fn get_material_cases(
        &self,
        material_ids: &str,
        correlation_id: &str,
    ) -> Result<Vec<MaterialCase>, DownstreamError> {
        tracing::debug!(material_ids = %material_ids, "Calling progression service for material IDs");

        let url = Url::parse_with_params(
            &format!("{}{}", self.base_url, self.path),
            &[("materialIds", material_ids)],
        )?;
        let headers = outbound_headers(&self.cjs_cppuid, correlation_id, Some(&self.accept))?;

        let result: Result<Vec<MaterialCase>, DownstreamError> = async {
            let response = self.http.get(url).headers(headers).send().await?;
            ensure_success(response.status())?;
            let envelope: Option<MaterialEnvelope> = response.json().await?;
            Ok(envelope.and_then(|e| e.material_ids).unwrap_or_default())
        }
        .await;

        match &result {
            Ok(cases) => {
                tracing::debug!(count = cases.len(), material_ids = %material_ids, "Retrieved material cases")
            }
            Err(e) => {
                tracing::error!(material_ids = %material_ids, error = %e, "Error calling progression service")
            }
        }
        result
    }
}
