//! Axum route handlers for cover letter records.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::letters::store::{
    create_letter, delete_letter, get_letter, list_letters, update_letter, SaveLetterParams,
};
use crate::models::block::ContentBlock;
use crate::models::letter::{CoverLetterRow, GenerationRow};
use crate::models::target::TargetInfo;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveLetterRequest {
    pub title: String,
    pub target_info: TargetInfo,
    pub blocks: Vec<ContentBlock>,
    /// When present, a generation snapshot is stored with the save.
    pub markdown: Option<String>,
    pub raw_text: Option<String>,
    pub latex: Option<String>,
}

impl SaveLetterRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        Ok(())
    }

    fn as_params(&self) -> SaveLetterParams<'_> {
        SaveLetterParams {
            title: &self.title,
            target_info: &self.target_info,
            blocks: &self.blocks,
            markdown: self.markdown.as_deref(),
            raw_text: self.raw_text.as_deref(),
            latex: self.latex.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LetterDetailResponse {
    pub letter: CoverLetterRow,
    /// Generation history, newest first; the head is the "latest" snapshot.
    pub generations: Vec<GenerationRow>,
}

/// POST /api/v1/letters
pub async fn handle_create_letter(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<SaveLetterRequest>,
) -> Result<(StatusCode, Json<CoverLetterRow>), AppError> {
    request.validate()?;
    let letter = create_letter(&state.db, identity.user_id, request.as_params()).await?;
    Ok((StatusCode::CREATED, Json(letter)))
}

/// PUT /api/v1/letters/:id
pub async fn handle_update_letter(
    State(state): State<AppState>,
    identity: Identity,
    Path(letter_id): Path<Uuid>,
    Json(request): Json<SaveLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    request.validate()?;
    let letter = update_letter(&state.db, identity.user_id, letter_id, request.as_params()).await?;
    Ok(Json(letter))
}

/// GET /api/v1/letters
pub async fn handle_list_letters(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    let letters = list_letters(&state.db, identity.user_id).await?;
    Ok(Json(letters))
}

/// GET /api/v1/letters/:id
pub async fn handle_get_letter(
    State(state): State<AppState>,
    identity: Identity,
    Path(letter_id): Path<Uuid>,
) -> Result<Json<LetterDetailResponse>, AppError> {
    let (letter, generations) = get_letter(&state.db, identity.user_id, letter_id).await?;
    Ok(Json(LetterDetailResponse {
        letter,
        generations,
    }))
}

/// DELETE /api/v1/letters/:id
pub async fn handle_delete_letter(
    State(state): State<AppState>,
    identity: Identity,
    Path(letter_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_letter(&state.db, identity.user_id, letter_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
