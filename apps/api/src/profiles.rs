//! Profile lookups. Only the username existence query surfaces here; the
//! debounce that coalesces rapid edits into one query lives in the client.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AppError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM profiles WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// GET /api/v1/profiles/availability?username=
pub async fn handle_availability(
    State(state): State<AppState>,
    _identity: Identity,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    if params.username.trim().is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }

    let exists = username_exists(&state.db, &params.username).await?;
    Ok(Json(AvailabilityResponse { available: !exists }))
}
