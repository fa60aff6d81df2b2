use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::library::ScenarioInput;
use crate::models::scenario::{Category, Scenario};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<Category>,
}

/// GET /api/v1/scenarios
pub async fn handle_list_scenarios(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Json<Vec<Scenario>> {
    let library = state.library.read().await;
    Json(library.list(params.category))
}

/// GET /api/v1/scenarios/:id
pub async fn handle_get_scenario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Scenario>, AppError> {
    let library = state.library.read().await;
    library
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Scenario {id} not found")))
}

/// POST /api/v1/scenarios
pub async fn handle_create_scenario(
    State(state): State<AppState>,
    Json(input): Json<ScenarioInput>,
) -> Result<(StatusCode, Json<Scenario>), AppError> {
    let scenario = state.library.write().await.add(input)?;
    Ok((StatusCode::CREATED, Json(scenario)))
}

/// PUT /api/v1/scenarios/:id
pub async fn handle_update_scenario(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ScenarioInput>,
) -> Result<Json<Scenario>, AppError> {
    let scenario = state.library.write().await.update(&id, input)?;
    Ok(Json(scenario))
}
