use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{run_blocking, ApiJson, AppState};
use crate::db::RecordFilter;
use crate::models::{CardHistory, HistoryEntry, NewVaccineRecord, VaccineRecord};
use crate::utils::AppResult;

/// POST /api/vacinacao
pub async fn create_record(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewVaccineRecord>,
) -> AppResult<Json<VaccineRecord>> {
    let record = run_blocking(&state, move |service| service.register_record(input)).await?;
    Ok(Json(record))
}

/// GET /api/vacinacao?personId=
pub async fn list_records(
    State(state): State<AppState>,
    Query(filter): Query<RecordFilter>,
) -> AppResult<Json<Vec<VaccineRecord>>> {
    let records = run_blocking(&state, move |service| service.list_records(&filter)).await?;
    Ok(Json(records))
}

/// DELETE /api/vacinacao/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    run_blocking(&state, move |service| service.delete_record(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/pessoas/{id}/cartao
pub async fn person_card(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let history = run_blocking(&state, move |service| service.person_history(id)).await?;
    Ok(Json(history))
}

/// GET /api/pessoas/{id}/cartoes
pub async fn person_cards(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<CardHistory>>> {
    let history = run_blocking(&state, move |service| service.person_history_by_card(id)).await?;
    Ok(Json(history))
}
