//! Axum route handlers for the generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::generation::generator::{generate_letter, GenerateLetterRequest};
use crate::llm_client::pick_preferred_model;
use crate::models::letter::GeneratedLetter;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    /// Suggested default: the first fast-tier identifier, else the first listed.
    pub preferred: Option<String>,
}

/// POST /api/v1/letters/generate
///
/// The core pipeline: validate enabled blocks, build the prompt, call the
/// model, return the in-memory snapshot. Nothing is persisted — saving is a
/// separate, explicit action.
pub async fn handle_generate(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<GenerateLetterRequest>,
) -> Result<Json<GeneratedLetter>, AppError> {
    let letter = generate_letter(
        state.generator.as_ref(),
        &state.config.default_model,
        &identity.access_token,
        request,
    )
    .await?;

    Ok(Json(letter))
}

/// GET /api/v1/models
///
/// Fetches the selectable model list from the generation endpoint with the
/// caller's own credential.
pub async fn handle_list_models(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ModelsResponse>, AppError> {
    let models = state.generator.list_models(&identity.access_token).await?;
    let preferred = pick_preferred_model(&models).map(str::to_string);

    Ok(Json(ModelsResponse { models, preferred }))
}
