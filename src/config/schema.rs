//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the BFF.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the audit BFF.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BffConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// CQRS platform gateway settings (users, id mappings, materials).
    pub cqrs: CqrsConfig,

    /// Microsoft Fabric settings (capacities, pipeline execution).
    pub fabric: FabricConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for inbound and outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total budget for handling one inbound request, in seconds.
    pub request_secs: u64,

    /// Per-downstream-call timeout, in seconds. A hung downstream must
    /// not hang the inbound request indefinitely.
    pub downstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            downstream_secs: 10,
        }
    }
}

/// Settings for the CQRS platform gateway fronting the users, system-id
/// mapper and progression query APIs. All three share one base URL; each
/// has its own path and Accept media type.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CqrsConfig {
    /// Gateway base URL.
    pub base_url: String,

    /// Static caller-identity value sent as the CJSCPPUID header on
    /// every outbound call.
    pub cjs_cppuid: String,

    /// Users/groups query endpoint.
    pub users: EndpointConfig,

    /// System-id mapper bulk mappings endpoint.
    pub system_id_mapper: EndpointConfig,

    /// Progression materials endpoint.
    pub progression: EndpointConfig,
}

impl Default for CqrsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            cjs_cppuid: String::new(),
            users: EndpointConfig {
                path: "/usersgroups-query-api/query/api/rest/usersgroups/users".to_string(),
                accept: "application/json".to_string(),
            },
            system_id_mapper: EndpointConfig {
                path: "/system-id-mapper-api/rest/systemid/mappings/bulk".to_string(),
                accept: "application/json".to_string(),
            },
            progression: EndpointConfig {
                path: "/progression-query-api/query/api/rest/progression/materials".to_string(),
                accept: "application/json".to_string(),
            },
        }
    }
}

/// One downstream endpoint under the CQRS gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EndpointConfig {
    /// Path appended to the gateway base URL.
    pub path: String,

    /// Accept media type for content negotiation.
    pub accept: String,
}

/// Microsoft Fabric settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FabricConfig {
    /// Azure subscription ID.
    pub subscription_id: String,

    /// Azure resource group holding the Fabric capacities.
    pub resource_group: String,

    /// Azure management-plane base URL.
    pub management_base_url: String,

    /// Management-plane bearer token, injected at deploy time.
    pub bearer_token: String,

    /// Pipeline execution settings. Absent means pipeline execution is
    /// not configured on this deployment; capacity management still works.
    pub pipeline: Option<PipelineConfig>,
}

impl Default for FabricConfig {
    fn default() -> Self {
        Self {
            subscription_id: String::new(),
            resource_group: String::new(),
            management_base_url: "https://management.azure.com".to_string(),
            bearer_token: String::new(),
            pipeline: None,
        }
    }
}

/// Fabric pipeline execution settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fabric REST API base URL.
    pub base_url: String,

    /// Workspace ID containing the pipeline item.
    pub workspace_id: String,

    /// Pipeline item ID.
    pub pipeline_id: String,

    /// Human-readable pipeline name echoed in responses.
    pub pipeline_name: String,
}
