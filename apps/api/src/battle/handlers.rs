use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::battle::{tactical_hint, BattleCard, Hint};
use crate::errors::AppError;
use crate::models::scenario::Scenario;
use crate::state::AppState;

async fn find_scenario(state: &AppState, id: &str) -> Result<Scenario, AppError> {
    state
        .library
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Scenario {id} not found")))
}

/// POST /api/v1/battle
///
/// Starts a round on a random card with the answer hidden.
pub async fn handle_start_battle(
    State(state): State<AppState>,
) -> Result<Json<BattleCard>, AppError> {
    let library = state.library.read().await;
    let scenario = library
        .random()
        .ok_or_else(|| AppError::NotFound("The tactic library is empty".to_string()))?;
    info!("Battle round on scenario {}", scenario.id);
    Ok(Json(BattleCard::from(scenario)))
}

/// POST /api/v1/battle/:id/hint
pub async fn handle_battle_hint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Hint>, AppError> {
    let scenario = find_scenario(&state, &id).await?;
    Ok(Json(tactical_hint(state.generator.as_ref(), &scenario).await))
}

/// GET /api/v1/battle/:id/reveal
pub async fn handle_battle_reveal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Scenario>, AppError> {
    find_scenario(&state, &id).await.map(Json)
}
