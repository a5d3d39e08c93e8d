//! Microsoft Fabric client: capacity management (Azure management plane)
//! and pipeline execution (Fabric REST API).
//!
//! # Design Decisions
//! - Capacity calls go straight to the ARM `Microsoft.Fabric/capacities`
//!   REST contract with a config-supplied management-plane bearer token
//! - Pipeline execution is optional per deployment; invoking it without
//!   the `[fabric.pipeline]` config is a distinct not-configured failure,
//!   never a downstream-call failure
//! - The job-instances API acknowledges with 202 and no status body, so
//!   the returned status is synthesized as "Queued"; the run ID is parsed
//!   from the body when the upstream supplies one

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{ensure_success, DownstreamError};
use crate::config::{FabricConfig, PipelineConfig};

const API_VERSION: &str = "2023-11-01";
const JOB_TYPE_PIPELINE: &str = "Pipeline";
const HEADER_X_CORRELATION_ID: &str = "X-Correlation-ID";

/// Parameters for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRequest {
    #[serde(rename = "requestinguser")]
    pub requesting_user: String,
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(rename = "from_dateutc")]
    pub from_date_utc: String,
    #[serde(rename = "to_dateutc")]
    pub to_date_utc: String,
}

/// Acknowledgement returned to the caller after queueing a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResponse {
    pub run_id: Option<String>,
    pub status: String,
    pub pipeline_name: String,
    pub execution_time: Option<i64>,
}

/// A Fabric capacity as served by the Azure management plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricCapacity {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sku: Option<CapacitySku>,
    #[serde(default)]
    pub properties: Option<CapacityProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitySku {
    pub name: String,
    #[serde(default)]
    pub tier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityProperties {
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CapacityList {
    #[serde(default)]
    value: Vec<FabricCapacity>,
}

#[derive(Debug, Deserialize)]
struct JobAccepted {
    #[serde(default)]
    id: Option<String>,
}

/// Client for Fabric capacity management and pipeline execution.
#[derive(Debug, Clone)]
pub struct FabricClient {
    http: reqwest::Client,
    config: FabricConfig,
}

impl FabricClient {
    pub fn new(http: reqwest::Client, config: FabricConfig) -> Self {
        Self { http, config }
    }

    pub fn subscription_id(&self) -> &str {
        &self.config.subscription_id
    }

    pub fn resource_group(&self) -> &str {
        &self.config.resource_group
    }

    fn capacities_url(&self) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Fabric/capacities",
            self.config.management_base_url.trim_end_matches('/'),
            self.config.subscription_id,
            self.config.resource_group,
        )
    }

    /// List the names of all capacities in the resource group.
    pub async fn list_capacities(&self) -> Result<Vec<String>, DownstreamError> {
        let response = self
            .http
            .get(self.capacities_url())
            .query(&[("api-version", API_VERSION)])
            .bearer_auth(&self.config.bearer_token)
            .send()
            .await?;
        ensure_success(response.status())?;

        let list: CapacityList = response.json().await?;
        Ok(list.value.into_iter().map(|c| c.name).collect())
    }

    /// Fetch one capacity by name. An upstream 404 means the capacity
    /// does not exist and is not an error.
    pub async fn get_capacity(
        &self,
        capacity_name: &str,
    ) -> Result<Option<FabricCapacity>, DownstreamError> {
        let response = self
            .http
            .get(format!("{}/{}", self.capacities_url(), capacity_name))
            .query(&[("api-version", API_VERSION)])
            .bearer_auth(&self.config.bearer_token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        ensure_success(response.status())?;

        Ok(Some(response.json().await?))
    }

    /// Delete one capacity by name.
    pub async fn delete_capacity(&self, capacity_name: &str) -> Result<(), DownstreamError> {
        let response = self
            .http
            .delete(format!("{}/{}", self.capacities_url(), capacity_name))
            .query(&[("api-version", API_VERSION)])
            .bearer_auth(&self.config.bearer_token)
            .send()
            .await?;
        ensure_success(response.status())
    }

    /// Queue one pipeline run. Returns the upstream HTTP status together
    /// with the acknowledgement body.
    pub async fn run_pipeline(
        &self,
        request: &PipelineRequest,
        correlation_id: &str,
    ) -> Result<(StatusCode, PipelineResponse), DownstreamError> {
        let pipeline = self.pipeline_config()?;

        tracing::info!(correlation_id = %correlation_id, "Running Fabric pipeline");

        let url = format!(
            "{}/workspaces/{}/items/{}/jobs/instances",
            pipeline.base_url.trim_end_matches('/'),
            pipeline.workspace_id,
            pipeline.pipeline_id,
        );
        let body = json!({
            "jobType": JOB_TYPE_PIPELINE,
            "parameters": request,
        });

        let response = self
            .http
            .post(url)
            .query(&[("api-version", API_VERSION)])
            .header(reqwest::header::ACCEPT, "application/json")
            .header(HEADER_X_CORRELATION_ID, correlation_id)
            .bearer_auth(&self.config.bearer_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(correlation_id = %correlation_id, error = %e, "Error running Fabric pipeline");
                DownstreamError::from(e)
            })?;

        let status = response.status();
        tracing::debug!(status = %status, "Pipeline API response status");
        ensure_success(status)?;

        // 202 acknowledgements often carry no body; a present one may
        // name the job instance.
        let run_id = response
            .json::<JobAccepted>()
            .await
            .ok()
            .and_then(|job| job.id);

        Ok((
            status,
            PipelineResponse {
                run_id,
                status: "Queued".to_string(),
                pipeline_name: pipeline.pipeline_name.clone(),
                execution_time: None,
            },
        ))
    }

    fn pipeline_config(&self) -> Result<&PipelineConfig, DownstreamError> {
        self.config.pipeline.as_ref().ok_or(DownstreamError::NotConfigured(
            "fabric.pipeline base URL, workspace ID and pipeline ID are required",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_request_uses_upstream_parameter_names() {
        let request = PipelineRequest {
            requesting_user: "user@example.com".to_string(),
            user_id: "u-1".to_string(),
            from_date_utc: "2024-01-01".to_string(),
            to_date_utc: "2024-01-31".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["requestinguser"], "user@example.com");
        assert_eq!(json["userid"], "u-1");
        assert_eq!(json["from_dateutc"], "2024-01-01");
        assert_eq!(json["to_dateutc"], "2024-01-31");
    }

    #[test]
    fn run_pipeline_without_config_fails_before_any_io() {
        let client = FabricClient::new(reqwest::Client::new(), FabricConfig::default());
        let err = client.pipeline_config().unwrap_err();
        assert!(matches!(err, DownstreamError::NotConfigured(_)));
    }

    #[test]
    fn capacity_list_envelope_deserializes() {
        let list: CapacityList = serde_json::from_str(
            r#"{"value":[{"name":"cap1","location":"uksouth","sku":{"name":"F2","tier":"Fabric"},
                "properties":{"state":"Active"}},{"name":"cap2"}]}"#,
        )
        .unwrap();
        let names: Vec<String> = list.value.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["cap1", "cap2"]);
    }
}
