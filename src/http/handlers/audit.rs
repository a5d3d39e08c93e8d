//! Audit report handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extract::RequestContext;
use crate::http::server::AppState;
use crate::services::AuditResponse;

/// Inbound audit request. Null and absent lists are equivalent to empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    #[serde(default)]
    pub user_id: Option<Vec<String>>,
    #[serde(default)]
    pub case_urn: Option<Vec<String>>,
    #[serde(default)]
    pub target_type: Option<String>,
}

/// `POST /audit/run`
///
/// Always 200; empty halves are a valid outcome, so the
/// empty-is-not-found policy does not apply here. The correlation ID is
/// taken from the inbound header when present, else generated.
pub async fn run_report(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<AuditRequest>,
) -> Result<Json<AuditResponse>, ApiError> {
    let correlation_id = ctx.correlation_or_generated();
    let user_ids = request.user_id.unwrap_or_default();
    let case_urns = request.case_urn.unwrap_or_default();
    let target_type = request.target_type.unwrap_or_default();

    tracing::info!(
        user_ids = user_ids.len(),
        case_urns = case_urns.len(),
        correlation_id = %correlation_id,
        "Running audit report"
    );

    let response = state
        .audit
        .get_enriched_audit(&user_ids, &case_urns, &target_type, &correlation_id)
        .await
        .map_err(|e| ctx.downstream(e))?;

    Ok(Json(response))
}
