pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation;
use crate::letters;
use crate::profiles;
use crate::render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation
        .route("/api/v1/models", get(generation::handlers::handle_list_models))
        .route(
            "/api/v1/letters/generate",
            post(generation::handlers::handle_generate),
        )
        // Letter records
        .route(
            "/api/v1/letters",
            post(letters::handlers::handle_create_letter)
                .get(letters::handlers::handle_list_letters),
        )
        .route(
            "/api/v1/letters/:id",
            get(letters::handlers::handle_get_letter)
                .put(letters::handlers::handle_update_letter)
                .delete(letters::handlers::handle_delete_letter),
        )
        // Rendering and export
        .route(
            "/api/v1/render/markdown",
            post(render::handlers::handle_render_markdown),
        )
        .route(
            "/api/v1/render/latex",
            post(render::handlers::handle_render_latex),
        )
        .route(
            "/api/v1/render/document",
            post(render::handlers::handle_render_document),
        )
        .route(
            "/api/v1/render/pdf",
            post(render::handlers::handle_render_pdf),
        )
        // Profiles
        .route(
            "/api/v1/profiles/availability",
            get(profiles::handle_availability),
        )
        .with_state(state)
}
