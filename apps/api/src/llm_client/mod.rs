//! LLM Client — the single point of entry for generative-model calls in Missive.
//!
//! ARCHITECTURAL RULE: No other module may call the model endpoint directly.
//! All generation traffic MUST go through `LetterGenerator`.
//!
//! The backend speaks an OpenAI-compatible chat-completions protocol and
//! authorizes with the caller's own bearer credential — the service holds no
//! API key of its own. There are no automatic retries: a failure is reported
//! to the caller, who decides whether the user retries manually.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::generation::prompt_builder::LetterPrompt;

/// Marker substring identifying a fast/cheap model tier. Auto-selection
/// prefers the first listed identifier containing it.
const FAST_TIER_MARKER: &str = "mini";

/// Upstream model latency is variable; a timeout surfaces as an upstream
/// failure, same as a non-success status.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A generated letter body as recovered from the model response.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterBody {
    pub markdown: String,
    pub raw_text: String,
}

/// The generation backend trait. `AppState` holds an `Arc<dyn LetterGenerator>`
/// so tests can swap in a counting mock without touching handler code.
#[async_trait]
pub trait LetterGenerator: Send + Sync {
    /// Sends a built prompt to the model endpoint on behalf of the user
    /// holding `access_token`. Single request/response, no streaming.
    async fn generate(
        &self,
        prompt: &LetterPrompt,
        model: &str,
        access_token: &str,
    ) -> Result<LetterBody, AppError>;

    /// Lists the model identifiers selectable for generation.
    async fn list_models(&self, access_token: &str) -> Result<Vec<String>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorEnvelope {
    error: UpstreamErrorBody,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// The two-key payload the model is instructed to return.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LetterPayload {
    markdown: String,
    raw_text: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP implementation
// ────────────────────────────────────────────────────────────────────────────

/// Production generator speaking to a remote chat-completions endpoint.
#[derive(Clone)]
pub struct HttpLetterGenerator {
    client: Client,
    base_url: String,
}

impl HttpLetterGenerator {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl LetterGenerator for HttpLetterGenerator {
    async fn generate(
        &self,
        prompt: &LetterPrompt,
        model: &str,
        access_token: &str,
    ) -> Result<LetterBody, AppError> {
        if access_token.is_empty() {
            return Err(AppError::Unauthorized);
        }

        let request_body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user_content,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(access_token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("generation request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation endpoint returned {status}: {body}");
            return Err(upstream_error(status.as_u16(), &body));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed generation response: {e}")))?;

        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::EmptyResponse);
        }

        debug!("Generation call succeeded ({} chars)", text.len());
        Ok(parse_letter_body(&text))
    }

    async fn list_models(&self, access_token: &str) -> Result<Vec<String>, AppError> {
        if access_token.is_empty() {
            return Err(AppError::Unauthorized);
        }

        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("model list request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upstream_error(status.as_u16(), &body));
        }

        let list: ModelList = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed model list: {e}")))?;

        Ok(list.data.into_iter().map(|m| m.id).collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response handling
// ────────────────────────────────────────────────────────────────────────────

/// Maps a non-success upstream response to an `AppError`.
///
/// A 401/403, or any error message that reads as an expired/invalid
/// credential, becomes `Unauthorized` so the client prompts the user to
/// re-authenticate instead of showing a raw upstream message.
fn upstream_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<UpstreamErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("request failed with status {status}"));

    if status == 401 || status == 403 || credential_rejected(&message) {
        AppError::Unauthorized
    } else {
        AppError::Upstream(message)
    }
}

fn credential_rejected(message: &str) -> bool {
    let msg = message.to_ascii_lowercase();
    (msg.contains("token") || msg.contains("credential") || msg.contains("api key"))
        && (msg.contains("expired") || msg.contains("invalid") || msg.contains("revoked"))
}

/// Parses model output into a `LetterBody`.
///
/// The model is instructed to return `{"markdown", "rawText"}` but is not
/// 100% reliable about it. A body that is not valid JSON is accepted
/// verbatim as both fields rather than rejected — this leniency is part of
/// the contract, not a fallback of convenience. A missing `rawText` is
/// derived by stripping the emphasis markers from `markdown`.
pub fn parse_letter_body(text: &str) -> LetterBody {
    let stripped = strip_json_fences(text);
    match serde_json::from_str::<LetterPayload>(stripped) {
        Ok(payload) => {
            let raw_text = payload
                .raw_text
                .unwrap_or_else(|| strip_emphasis_markers(&payload.markdown));
            LetterBody {
                markdown: payload.markdown,
                raw_text,
            }
        }
        Err(_) => LetterBody {
            markdown: text.trim().to_string(),
            raw_text: text.trim().to_string(),
        },
    }
}

/// Removes the `<mark>`/`</mark>` tags the model uses to flag text quoted
/// verbatim from a content block.
pub fn strip_emphasis_markers(text: &str) -> String {
    text.replace("<mark>", "").replace("</mark>", "")
}

/// Strips ```json fences if the model wraps its reply in them despite the
/// system instruction.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(inner) => {
            let inner = inner.trim_start();
            inner.strip_suffix("```").map(str::trim).unwrap_or(inner)
        }
        None => text,
    }
}

/// Picks the default model from a fetched list: the first identifier
/// containing the fast-tier marker, else the first listed. Plain substring
/// preference — there is no structured capability negotiation upstream.
pub fn pick_preferred_model(models: &[String]) -> Option<&str> {
    models
        .iter()
        .find(|m| m.contains(FAST_TIER_MARKER))
        .or_else(|| models.first())
        .map(String::as_str)
}
