//! Material lookup handler.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::clients::progression::MaterialCase;
use crate::http::error::ApiError;
use crate::http::extract::{CorrelationId, RequestContext};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialIdQuery {
    material_ids: Option<String>,
}

/// `GET /material/id?materialIds=<csv>`
pub async fn get_material(
    State(state): State<AppState>,
    ctx: RequestContext,
    CorrelationId(correlation_id): CorrelationId,
    Query(query): Query<MaterialIdQuery>,
) -> Result<Json<Vec<MaterialCase>>, ApiError> {
    let material_ids = query
        .material_ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| ctx.validation("Required query parameter 'materialIds' is missing"))?;

    tracing::info!(material_ids = %material_ids, correlation_id = %correlation_id, "Fetching material cases");
    let material_cases = state
        .progression
        .get_material_cases(&material_ids, &correlation_id)
        .await
        .map_err(|e| ctx.downstream(e))?;

    if material_cases.is_empty() {
        tracing::warn!(material_ids = %material_ids, "No material cases found");
        return Err(ctx.not_found("No Material Cases found for the provided Material IDs"));
    }
    Ok(Json(material_cases))
}
