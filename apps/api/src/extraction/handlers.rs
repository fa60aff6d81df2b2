use axum::Json;
use serde::Deserialize;

use crate::extraction::{extract_tactic, TacticDraft};

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

/// POST /api/v1/tactics/extract
///
/// Extracts a card draft from pasted text. Never fails on content.
pub async fn handle_extract(Json(req): Json<ExtractRequest>) -> Json<TacticDraft> {
    Json(extract_tactic(&req.text))
}
