//! Axum route handlers for rendering and export.
//!
//! Renderers themselves always render whatever text they are given; the
//! nothing-to-render case is short-circuited here, before any renderer or
//! the compile bridge is invoked.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::target::TargetInfo;
use crate::render::docx::{render_document, DocumentTree};
use crate::render::filename::export_filename;
use crate::render::latex::render_latex;
use crate::render::markdown::render_markdown;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub target_info: TargetInfo,
    pub body_text: String,
}

#[derive(Debug, Serialize)]
pub struct MarkdownResponse {
    pub markdown: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct LatexResponse {
    pub latex: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub document: DocumentTree,
    pub filename: String,
}

fn require_body(request: &RenderRequest) -> Result<(), AppError> {
    if request.body_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Nothing to render — generate a letter first.".to_string(),
        ));
    }
    Ok(())
}

fn render_date() -> NaiveDate {
    Local::now().date_naive()
}

/// POST /api/v1/render/markdown
pub async fn handle_render_markdown(
    _identity: Identity,
    Json(request): Json<RenderRequest>,
) -> Result<Json<MarkdownResponse>, AppError> {
    require_body(&request)?;
    Ok(Json(MarkdownResponse {
        markdown: render_markdown(&request.body_text),
        filename: export_filename(&request.target_info, "md", render_date()),
    }))
}

/// POST /api/v1/render/latex
pub async fn handle_render_latex(
    _identity: Identity,
    Json(request): Json<RenderRequest>,
) -> Result<Json<LatexResponse>, AppError> {
    require_body(&request)?;
    let date = render_date();
    Ok(Json(LatexResponse {
        latex: render_latex(&request.target_info, &request.body_text, date),
        filename: export_filename(&request.target_info, "tex", date),
    }))
}

/// POST /api/v1/render/document
///
/// Returns the paragraph tree for the external binary packer.
pub async fn handle_render_document(
    _identity: Identity,
    Json(request): Json<RenderRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    require_body(&request)?;
    let date = render_date();
    Ok(Json(DocumentResponse {
        document: render_document(&request.target_info, &request.body_text, date),
        filename: export_filename(&request.target_info, "docx", date),
    }))
}

/// POST /api/v1/render/pdf
///
/// Renders LaTeX server-side and hands it to the compile bridge. Responds
/// with the PDF byte stream and a download filename; a compile failure
/// surfaces the bridge's own explanation as an upstream error.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    _identity: Identity,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    require_body(&request)?;
    let date = render_date();
    let latex = render_latex(&request.target_info, &request.body_text, date);
    let pdf = state.pdf.compile(&latex).await?;

    let filename = export_filename(&request.target_info, "pdf", date);
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    Ok((headers, pdf).into_response())
}
