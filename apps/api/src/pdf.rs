//! PDF compilation bridge — posts LaTeX source to the external compile
//! service and returns the PDF byte stream. Treated as a black box: one
//! request, no retries, and its structured error is surfaced verbatim.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;

const COMPILE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    #[serde(rename = "latexCode")]
    latex_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompileFailure {
    error: String,
    details: Option<String>,
}

#[derive(Clone)]
pub struct PdfClient {
    client: Client,
    base_url: String,
}

impl PdfClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(COMPILE_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    /// Compiles LaTeX source to a PDF byte stream.
    pub async fn compile(&self, latex_code: &str) -> Result<Bytes, AppError> {
        let response = self
            .client
            .post(format!("{}/compile", self.base_url))
            .json(&CompileRequest { latex_code })
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("PDF compile request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("PDF compile service returned {status}: {body}");
            return Err(AppError::Upstream(compile_error_message(
                status.as_u16(),
                &body,
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("PDF compile response unreadable: {e}")))
    }
}

/// The compile service reports `{ "error", "details"? }`; `details` carries
/// the LaTeX log excerpt the user needs, so it wins over `error`.
fn compile_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<CompileFailure>(body)
        .map(|f| f.details.unwrap_or(f.error))
        .unwrap_or_else(|_| format!("PDF compilation failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_preferred_over_error() {
        let body = r#"{"error":"compile failed","details":"! Undefined control sequence. l.12"}"#;
        assert_eq!(
            compile_error_message(422, body),
            "! Undefined control sequence. l.12"
        );
    }

    #[test]
    fn test_error_used_when_details_absent() {
        let body = r#"{"error":"compile failed"}"#;
        assert_eq!(compile_error_message(422, body), "compile failed");
    }

    #[test]
    fn test_unstructured_body_reports_status() {
        assert!(compile_error_message(500, "boom").contains("500"));
    }
}
