use crate::errors::AppError;
use crate::models::{
    Counter, CreateCounterRequest, GlobalHistoryEntry, HistoryEntry, MessageResponse,
    UpdateCounterRequest,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.api_base_url))
}

pub async fn list_counters(State(state): State<AppState>) -> Result<Json<Vec<Counter>>, AppError> {
    let counters = state
        .store
        .list_counters()
        .await
        .map_err(AppError::store("failed to list counters"))?;
    Ok(Json(counters))
}

pub async fn create_counter(
    State(state): State<AppState>,
    Json(payload): Json<CreateCounterRequest>,
) -> Result<(StatusCode, Json<Counter>), AppError> {
    let counter = state
        .store
        .create_counter(&payload.name)
        .await
        .map_err(AppError::store("failed to create counter"))?;
    Ok((StatusCode::CREATED, Json(counter)))
}

pub async fn update_counter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCounterRequest>,
) -> Result<Json<Counter>, AppError> {
    let counter = state
        .store
        .update_counter(id, payload.count)
        .await
        .map_err(AppError::store("failed to update counter"))?;
    Ok(Json(counter))
}

pub async fn delete_counter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .store
        .delete_counter(id)
        .await
        .map_err(AppError::store("failed to delete counter"))?;
    Ok(Json(MessageResponse {
        message: "counter deleted".to_string(),
    }))
}

pub async fn counter_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let entries = state
        .store
        .history_for_counter(id)
        .await
        .map_err(AppError::store("failed to load history"))?;
    Ok(Json(entries))
}

pub async fn global_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<GlobalHistoryEntry>>, AppError> {
    let entries = state
        .store
        .global_history()
        .await
        .map_err(AppError::store("failed to load history"))?;
    Ok(Json(entries))
}
