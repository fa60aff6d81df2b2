pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::battle::handlers as battle;
use crate::extraction::handlers as extraction;
use crate::library::handlers as library;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Tactic library
        .route(
            "/api/v1/scenarios",
            get(library::handle_list_scenarios).post(library::handle_create_scenario),
        )
        .route(
            "/api/v1/scenarios/:id",
            get(library::handle_get_scenario).put(library::handle_update_scenario),
        )
        // Battle mode
        .route("/api/v1/battle", post(battle::handle_start_battle))
        .route("/api/v1/battle/:id/hint", post(battle::handle_battle_hint))
        .route("/api/v1/battle/:id/reveal", get(battle::handle_battle_reveal))
        // Assistant chat
        .route("/api/v1/chat", post(assistant::handle_start_conversation))
        .route(
            "/api/v1/chat/:id",
            get(assistant::handle_get_conversation).delete(assistant::handle_delete_conversation),
        )
        .route(
            "/api/v1/chat/:id/messages",
            post(assistant::handle_send_message),
        )
        .route(
            "/api/v1/chat/:id/regenerate",
            post(assistant::handle_regenerate),
        )
        .route(
            "/api/v1/chat/:id/messages/:message_id/draft",
            post(assistant::handle_draft_from_message),
        )
        // Extraction
        .route(
            "/api/v1/tactics/extract",
            post(extraction::handle_extract),
        )
        .with_state(state)
}
