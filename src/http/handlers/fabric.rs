//! Fabric capacity and pipeline handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::clients::fabric::{FabricCapacity, PipelineResponse};
use crate::http::error::ApiError;
use crate::http::extract::{CorrelationId, RequestContext};
use crate::http::server::AppState;

/// `GET /fabric/capacities`
pub async fn list_capacities(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<String>>, ApiError> {
    tracing::info!("Retrieving all Fabric capacities");
    let capacities = state
        .fabric
        .list_capacities()
        .await
        .map_err(|e| ctx.service(e))?;
    Ok(Json(capacities))
}

/// `GET /fabric/capacities/{capacity_name}`
pub async fn get_capacity(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(capacity_name): Path<String>,
) -> Result<Json<FabricCapacity>, ApiError> {
    tracing::info!(capacity_name = %capacity_name, "Retrieving Fabric capacity");
    let capacity = state
        .fabric
        .get_capacity(&capacity_name)
        .await
        .map_err(|e| ctx.service(e))?;

    capacity
        .map(Json)
        .ok_or_else(|| ctx.not_found(format!("Capacity not found: {}", capacity_name)))
}

/// `DELETE /fabric/capacities/{capacity_name}`
pub async fn delete_capacity(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(capacity_name): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(capacity_name = %capacity_name, "Deleting Fabric capacity");
    state
        .fabric
        .delete_capacity(&capacity_name)
        .await
        .map_err(|e| ctx.service(e))?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct PipelineQuery {
    #[serde(rename = "requestinguser", default)]
    requesting_user: Option<String>,
    #[serde(rename = "userid", default)]
    user_id: Option<String>,
    #[serde(rename = "from_dateutc", default)]
    from_date_utc: Option<String>,
    #[serde(rename = "to_dateutc", default)]
    to_date_utc: Option<String>,
}

/// `POST /fabric/pipeline/execute?requestinguser=&userid=&from_dateutc=&to_dateutc=`
///
/// Forwards the upstream HTTP status (202 on successful queueing).
pub async fn execute_pipeline(
    State(state): State<AppState>,
    ctx: RequestContext,
    CorrelationId(correlation_id): CorrelationId,
    Query(query): Query<PipelineQuery>,
) -> Result<(StatusCode, Json<PipelineResponse>), ApiError> {
    tracing::info!(correlation_id = %correlation_id, "Received pipeline execution request");

    // Absent parameters surface through the service's blank checks so
    // missing and empty inputs fail with the same message.
    let (status, response) = state
        .fabric
        .execute_pipeline(
            query.requesting_user.as_deref().unwrap_or(""),
            query.user_id.as_deref().unwrap_or(""),
            query.from_date_utc.as_deref().unwrap_or(""),
            query.to_date_utc.as_deref().unwrap_or(""),
            &correlation_id,
        )
        .await
        .map_err(|e| ctx.service(e))?;

    tracing::debug!(
        status = status.as_u16(),
        run_id = response.run_id.as_deref().unwrap_or("unknown"),
        "Pipeline execution response"
    );

    Ok((status, Json(response)))
}
