//! Prompt Builder — deterministically serializes target info and the enabled
//! content blocks into a generation request. Pure: no network, no storage,
//! no clock.

use crate::errors::AppError;
use crate::generation::prompts::LETTER_SYSTEM;
use crate::models::block::{BlockCategory, ContentBlock};
use crate::models::target::TargetInfo;

/// A fully built generation request: the fixed system instruction plus the
/// serialized user content.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterPrompt {
    pub system: String,
    pub user_content: String,
}

/// Builds the prompt from target info and the caller's block collection.
///
/// Only blocks with `is_enabled` contribute, in canonical category order
/// (insertion order within a category). Contact fields go through the
/// `visible_*` accessors, so a disabled field is omitted entirely — never
/// emitted blank. Zero enabled blocks is a validation error; the caller must
/// not reach the network in that case.
pub fn build_prompt(
    target: &TargetInfo,
    blocks: &[ContentBlock],
) -> Result<LetterPrompt, AppError> {
    let enabled: Vec<&ContentBlock> = blocks.iter().filter(|b| b.is_enabled).collect();
    if enabled.is_empty() {
        return Err(AppError::Validation(
            "No content blocks enabled. Enable at least one block before generating.".to_string(),
        ));
    }

    let mut content = String::from("CONTENT BLOCKS:\n\n");
    for category in BlockCategory::ALL {
        for block in enabled.iter().filter(|b| b.category == category) {
            content.push_str(&format!("[{}]\n{}\n\n", category.label(), block.content));
        }
    }

    content.push_str("CANDIDATE:\n");
    push_field(&mut content, "Name", &target.author_name);
    if let Some(email) = target.visible_email() {
        push_field(&mut content, "Email", email);
    }
    if let Some(phone) = target.visible_phone() {
        push_field(&mut content, "Phone", phone);
    }
    if let Some(location) = target.visible_city_state() {
        push_field(&mut content, "Location", location);
    }
    if let Some(url) = target.visible_portfolio_url() {
        push_field(&mut content, "Portfolio", url);
    }

    content.push_str("\nTARGET ROLE:\n");
    push_field(&mut content, "Company", &target.company_name);
    push_field(&mut content, "Role", &target.role_title);
    push_field(&mut content, "Addressee", &target.addressee);
    push_field(&mut content, "Job ID", &target.job_id);

    Ok(LetterPrompt {
        system: LETTER_SYSTEM.to_string(),
        user_content: content,
    })
}

fn push_field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("{label}: {value}\n"));
    }
}
