use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{run_blocking, ApiJson, AppState};
use crate::models::VaccineCard;
use crate::utils::AppResult;

/// POST /api/cartoes
pub async fn create_card(
    State(state): State<AppState>,
    ApiJson(card): ApiJson<VaccineCard>,
) -> AppResult<impl IntoResponse> {
    let card = run_blocking(&state, move |service| service.register_card(card)).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, "/api/cartoes")],
        Json(card),
    ))
}

/// GET /api/cartoes
pub async fn list_cards(State(state): State<AppState>) -> AppResult<Json<Vec<VaccineCard>>> {
    let cards = run_blocking(&state, |service| service.list_cards()).await?;
    Ok(Json(cards))
}

/// DELETE /api/cartoes/{id}
pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    run_blocking(&state, move |service| service.delete_card(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
