//! User lookup handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::clients::user::User;
use crate::http::error::ApiError;
use crate::http::extract::{CorrelationId, RequestContext};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    emails: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    user_ids: Option<String>,
}

/// `GET /user/email?emails=<csv>`
pub async fn get_users_by_email(
    State(state): State<AppState>,
    ctx: RequestContext,
    CorrelationId(correlation_id): CorrelationId,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let emails = query
        .emails
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ctx.validation("Required query parameter 'emails' is missing"))?;

    tracing::info!(emails = %emails, correlation_id = %correlation_id, "Fetching users for emails");
    let users = state
        .user
        .get_users_by_emails(&emails, &correlation_id)
        .await
        .map_err(|e| ctx.downstream(e))?;

    if users.is_empty() {
        tracing::warn!(emails = %emails, "No users found for emails");
        return Err(ctx.not_found("No users found for the provided email addresses"));
    }
    Ok(Json(users))
}

/// `GET /user/id?userIds=<csv>`
pub async fn get_users_by_id(
    State(state): State<AppState>,
    ctx: RequestContext,
    CorrelationId(correlation_id): CorrelationId,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let user_ids = query
        .user_ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| ctx.validation("Required query parameter 'userIds' is missing"))?;

    tracing::info!(user_ids = %user_ids, correlation_id = %correlation_id, "Fetching users for IDs");
    let users = state
        .user
        .get_users_by_ids(&user_ids, &correlation_id)
        .await
        .map_err(|e| ctx.downstream(e))?;

    if users.is_empty() {
        tracing::warn!(user_ids = %user_ids, "No users found for IDs");
        return Err(ctx.not_found("No users found for the provided User IDs"));
    }
    Ok(Json(users))
}
