//! # HTTP API
//!
//! JSON-API under `/api`:
//! - `/pessoas` - personer (registrera, lista, ta bort, vaccinationskort)
//! - `/vacinas` - vacciner
//! - `/cartoes` - vaccinationskort
//! - `/vacinacao` - vaccinationer
//! - `/health` - liveness probe

pub mod cards;
pub mod persons;
pub mod records;
pub mod vaccines;

use axum::{
    extract::FromRequest,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::models::ServerSettings;
use crate::services::VaccinationService;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Routrar utan middleware
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route(
            "/pessoas",
            post(persons::create_person).get(persons::list_persons),
        )
        .route("/pessoas/{id}", delete(persons::delete_person))
        .route("/pessoas/{id}/cartao", get(records::person_card))
        .route("/pessoas/{id}/cartoes", get(records::person_cards))
        .route(
            "/vacinas",
            post(vaccines::create_vaccine).get(vaccines::list_vaccines),
        )
        .route("/vacinas/{id}", delete(vaccines::delete_vaccine))
        .route("/cartoes", post(cards::create_card).get(cards::list_cards))
        .route("/cartoes/{id}", delete(cards::delete_card))
        .route(
            "/vacinacao",
            post(records::create_record).get(records::list_records),
        )
        .route("/vacinacao/{id}", delete(records::delete_record));

    Router::new().nest("/api", api).with_state(state)
}

/// Hela applikationen med tracing och CORS enligt inställningarna
pub fn app(db: Database, settings: &ServerSettings) -> Router {
    let app = router(AppState::new(db)).layer(TraceLayer::new_for_http());

    if settings.allow_any_origin {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// `Json` vars avvisning blir `AppError`, så trasiga kroppar ger 400 med meddelande
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Kör registrets synkrona databasanrop utanför async-trådarna
pub(crate) async fn run_blocking<F, T>(state: &AppState, f: F) -> AppResult<T>
where
    F: FnOnce(VaccinationService<'_>) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || f(VaccinationService::new(&db)))
        .await
        .map_err(|e| AppError::other(format!("Bakgrundsuppgift misslyckades: {}", e)))?
}
