//! Axum route handlers for the assistant chat.
//!
//! The conversation lock is never held across a model call: the turn is
//! prepared under the lock, generated without it, then recorded.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::assistant::{reply, Conversation, Turn};
use crate::errors::AppError;
use crate::extraction::TacticDraft;
use crate::models::chat::ChatMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Conversation {id} not found"))
}

/// POST /api/v1/chat
pub async fn handle_start_conversation(
    State(state): State<AppState>,
) -> (StatusCode, Json<Conversation>) {
    let conversation = Conversation::new();
    info!("Started conversation {}", conversation.id);
    state
        .conversations
        .write()
        .await
        .insert(conversation.id, conversation.clone());
    (StatusCode::CREATED, Json(conversation))
}

/// GET /api/v1/chat/:id
pub async fn handle_get_conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Conversation>, AppError> {
    let conversations = state.conversations.read().await;
    conversations
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// DELETE /api/v1/chat/:id
pub async fn handle_delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .conversations
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| not_found(id))?;
    info!("Deleted conversation {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/chat/:id/messages
///
/// Records the user's message and returns the assistant's reply.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    let turn = {
        let mut conversations = state.conversations.write().await;
        let conversation = conversations.get_mut(&id).ok_or_else(|| not_found(id))?;
        conversation.begin_turn(&req.text)?
    };
    answer(&state, id, turn).await.map(Json)
}

/// POST /api/v1/chat/:id/regenerate
///
/// Replaces the latest assistant reply with a fresh one.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatMessage>, AppError> {
    let turn = {
        let mut conversations = state.conversations.write().await;
        let conversation = conversations.get_mut(&id).ok_or_else(|| not_found(id))?;
        conversation.begin_regenerate()?
    };
    answer(&state, id, turn).await.map(Json)
}

/// POST /api/v1/chat/:id/messages/:message_id/draft
///
/// Pre-fills a card from an assistant reply ("save to library").
pub async fn handle_draft_from_message(
    State(state): State<AppState>,
    Path((id, message_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TacticDraft>, AppError> {
    let conversations = state.conversations.read().await;
    let conversation = conversations.get(&id).ok_or_else(|| not_found(id))?;
    conversation.draft(message_id).map(Json)
}

async fn answer(state: &AppState, id: Uuid, turn: Turn) -> Result<ChatMessage, AppError> {
    let text = reply(state.generator.as_ref(), &turn).await;
    let mut conversations = state.conversations.write().await;
    let conversation = conversations.get_mut(&id).ok_or_else(|| not_found(id))?;
    Ok(conversation.push_reply(text))
}
