use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{run_blocking, ApiJson, AppState};
use crate::db::PersonFilter;
use crate::models::Person;
use crate::utils::AppResult;

/// POST /api/pessoas
pub async fn create_person(
    State(state): State<AppState>,
    ApiJson(person): ApiJson<Person>,
) -> AppResult<impl IntoResponse> {
    let person = run_blocking(&state, move |service| service.register_person(person)).await?;

    let location = format!("/api/pessoas/{}/cartao", person.id.unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(person)))
}

/// GET /api/pessoas?name=&cpf=
pub async fn list_persons(
    State(state): State<AppState>,
    Query(filter): Query<PersonFilter>,
) -> AppResult<Json<Vec<Person>>> {
    let persons = run_blocking(&state, move |service| service.list_persons(&filter)).await?;
    Ok(Json(persons))
}

/// DELETE /api/pessoas/{id}
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    run_blocking(&state, move |service| service.delete_person(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
