use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::cpf::CpfError;
use crate::models::{
    InvalidDose, PersonValidationError, VaccineCardValidationError, VaccineValidationError,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Databasfel: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO-fel: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    /// Saknad post. Meddelandet är valfritt; utan meddelande blir svaret tomt.
    #[error("{}", .0.as_deref().unwrap_or("Hittades inte"))]
    NotFound(Option<String>),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(Some(msg.into()))
    }

    /// 404 utan meddelande
    pub fn not_found_empty() -> Self {
        Self::NotFound(None)
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Översätt en unik-index-krock från databasen till samma dubblettfel som
    /// applikationens egen kontroll ger. Övriga fel passerar oförändrade.
    pub fn from_insert(err: rusqlite::Error, duplicate_msg: &str) -> Self {
        if is_unique_violation(&err) {
            Self::already_exists(duplicate_msg)
        } else {
            Self::Database(err)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Io(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CpfError> for AppError {
    fn from(err: CpfError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PersonValidationError> for AppError {
    fn from(err: PersonValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<VaccineValidationError> for AppError {
    fn from(err: VaccineValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<VaccineCardValidationError> for AppError {
    fn from(err: VaccineCardValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<InvalidDose> for AppError {
    fn from(err: InvalidDose) -> Self {
        Self::Validation(err.to_string())
    }
}

/// En JSON-kropp som inte går att tolka är ett valideringsfel (400)
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            Self::NotFound(None) => status.into_response(),
            Self::Database(_) | Self::Io(_) | Self::Other(_) => {
                tracing::error!("Internt fel: {}", self);
                (status, "Internal server error").into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

/// Kolla om ett rusqlite-fel kommer från ett UNIQUE-villkor
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::already_exists("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found_empty().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::other("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_cpf_error_becomes_validation() {
        let err: AppError = CpfError::WrongLength.into();
        assert!(matches!(err, AppError::Validation(ref m) if m == "CPF must have 11 digits"));
    }

    #[test]
    fn test_unique_violation_detection() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL UNIQUE);")
            .unwrap();
        conn.execute("INSERT INTO t (name) VALUES ('a')", []).unwrap();

        let err = conn.execute("INSERT INTO t (name) VALUES ('a')", []).unwrap_err();
        assert!(is_unique_violation(&err));

        let mapped = AppError::from_insert(err, "dubblett");
        assert!(matches!(mapped, AppError::AlreadyExists(ref m) if m == "dubblett"));

        let err = conn.execute("INSERT INTO t (name) VALUES (NULL)", []).unwrap_err();
        assert!(!is_unique_violation(&err));
    }
}
