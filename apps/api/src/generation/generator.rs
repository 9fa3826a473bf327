//! Letter generation — orchestrates the pipeline for one "Generate" action.
//!
//! Flow: validate enabled blocks → build_prompt → LetterGenerator::generate →
//! wrap the body as a GeneratedLetter snapshot. Nothing is persisted here;
//! the snapshot stays the in-memory "current letter" until an explicit save.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::prompt_builder::build_prompt;
use crate::llm_client::LetterGenerator;
use crate::models::block::ContentBlock;
use crate::models::letter::GeneratedLetter;
use crate::models::target::TargetInfo;

/// Request body for letter generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateLetterRequest {
    pub target_info: TargetInfo,
    pub blocks: Vec<ContentBlock>,
    /// Model identifier chosen by the user from the fetched list;
    /// falls back to the configured default when absent.
    pub model: Option<String>,
}

/// Runs one generation: prompt construction, the model call, and snapshot
/// assembly. The target company/role are denormalized into the snapshot at
/// this moment so later edits to target info do not rewrite history.
pub async fn generate_letter(
    generator: &dyn LetterGenerator,
    default_model: &str,
    access_token: &str,
    request: GenerateLetterRequest,
) -> Result<GeneratedLetter, AppError> {
    let prompt = build_prompt(&request.target_info, &request.blocks)?;
    let model = request.model.as_deref().unwrap_or(default_model);

    info!("Generating letter with model {model}");
    let body = generator.generate(&prompt, model, access_token).await?;

    Ok(GeneratedLetter {
        id: Uuid::new_v4(),
        markdown: body.markdown,
        raw_text: body.raw_text,
        target_company: request.target_info.company_name.clone(),
        target_role: request.target_info.role_title.clone(),
        created_at: Utc::now(),
    })
}
