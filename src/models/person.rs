use serde::{Deserialize, Serialize};

use crate::utils::cpf::{validate_cpf, CpfError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    pub id: Option<i64>,
    pub name: String,
    pub cpf: String,
}

impl Person {
    pub fn new(name: impl Into<String>, cpf: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            cpf: cpf.into(),
        }
    }

    /// Validera personen. CPF kontrolleras före namnet.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        validate_cpf(&self.cpf)?;

        if self.name.is_empty() {
            return Err(PersonValidationError::MissingName);
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersonValidationError {
    #[error(transparent)]
    Cpf(#[from] CpfError),
    #[error("Invalid name")]
    MissingName,
}
