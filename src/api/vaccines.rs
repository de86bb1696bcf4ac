use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{run_blocking, ApiJson, AppState};
use crate::models::Vaccine;
use crate::utils::AppResult;

/// POST /api/vacinas
pub async fn create_vaccine(
    State(state): State<AppState>,
    ApiJson(vaccine): ApiJson<Vaccine>,
) -> AppResult<Json<Vaccine>> {
    let vaccine = run_blocking(&state, move |service| service.register_vaccine(vaccine)).await?;
    Ok(Json(vaccine))
}

/// GET /api/vacinas
pub async fn list_vaccines(State(state): State<AppState>) -> AppResult<Json<Vec<Vaccine>>> {
    let vaccines = run_blocking(&state, |service| service.list_vaccines()).await?;
    Ok(Json(vaccines))
}

/// DELETE /api/vacinas/{id}
pub async fn delete_vaccine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    run_blocking(&state, move |service| service.delete_vaccine(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
