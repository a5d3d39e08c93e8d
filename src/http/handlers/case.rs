//! Case mapping lookup handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::clients::system_id_mapper::CaseMapping;
use crate::http::error::ApiError;
use crate::http::extract::{CorrelationId, RequestContext};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUrnQuery {
    case_urns: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseIdQuery {
    case_ids: Option<String>,
}

/// `GET /case/urn?caseUrns=<csv>`
pub async fn get_case_id(
    State(state): State<AppState>,
    ctx: RequestContext,
    CorrelationId(correlation_id): CorrelationId,
    Query(query): Query<CaseUrnQuery>,
) -> Result<Json<Vec<CaseMapping>>, ApiError> {
    let case_urns = query
        .case_urns
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ctx.validation("Required query parameter 'caseUrns' is missing"))?;

    tracing::info!(case_urns = %case_urns, correlation_id = %correlation_id, "Fetching case IDs for URNs");
    let mappings = state
        .case
        .get_case_id_by_urn(&case_urns, &correlation_id)
        .await
        .map_err(|e| ctx.downstream(e))?;

    if mappings.is_empty() {
        tracing::warn!(case_urns = %case_urns, "No case IDs found for URNs");
        return Err(ctx.not_found("No Case IDs found for the provided URNs"));
    }
    Ok(Json(mappings))
}

/// `GET /case/id?caseIds=<csv>`
pub async fn get_case_urn(
    State(state): State<AppState>,
    ctx: RequestContext,
    CorrelationId(correlation_id): CorrelationId,
    Query(query): Query<CaseIdQuery>,
) -> Result<Json<Vec<CaseMapping>>, ApiError> {
    let case_ids = query
        .case_ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| ctx.validation("Required query parameter 'caseIds' is missing"))?;

    tracing::info!(case_ids = %case_ids, correlation_id = %correlation_id, "Fetching case URNs for IDs");
    let mappings = state
        .case
        .get_case_urn_by_case_id(&case_ids, &correlation_id)
        .await
        .map_err(|e| ctx.downstream(e))?;

    if mappings.is_empty() {
        tracing::warn!(case_ids = %case_ids, "No case URNs found for IDs");
        return Err(ctx.not_found("No Case URNs found for the provided Case IDs"));
    }
    Ok(Json(mappings))
}
