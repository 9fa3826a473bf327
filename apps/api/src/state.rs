use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LetterGenerator;
use crate::pdf::PdfClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable generation backend. Production: `HttpLetterGenerator`;
    /// tests swap in a counting mock.
    pub generator: Arc<dyn LetterGenerator>,
    /// Bridge to the external LaTeX-to-PDF compile service.
    pub pdf: PdfClient,
    pub config: Config,
}
