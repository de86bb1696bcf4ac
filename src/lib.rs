//! Vacina API - Vaccinationsregister över HTTP
//!
//! En JSON-tjänst byggd med Rust, axum och SQLite för personer, vacciner,
//! vaccinationskort och registrerade doser.

pub mod api;
pub mod db;
pub mod models;
pub mod services;
pub mod utils;

// Re-exports
pub use db::Database;
pub use models::*;
pub use services::VaccinationService;
