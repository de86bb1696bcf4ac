use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vaccine {
    pub id: Option<i64>,
    /// T.ex. BCG, Hepatit B
    pub name: String,
    pub manufacturer: String,
}

impl Vaccine {
    pub fn new(name: impl Into<String>, manufacturer: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            manufacturer: manufacturer.into(),
        }
    }

    pub fn validate(&self) -> Result<(), VaccineValidationError> {
        if self.name.is_empty() {
            return Err(VaccineValidationError::MissingName);
        }

        if self.manufacturer.is_empty() {
            return Err(VaccineValidationError::MissingManufacturer);
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VaccineValidationError {
    #[error("Invalid name")]
    MissingName,
    #[error("Invalid Manufacturer")]
    MissingManufacturer,
}
