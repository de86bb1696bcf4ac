use serde::{Deserialize, Serialize};

/// Namngiven gruppering av vaccinationer, t.ex. "Vuxen" eller "Barn"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VaccineCard {
    pub id: Option<i64>,
    pub name: String,
}

impl VaccineCard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), VaccineCardValidationError> {
        if self.name.is_empty() {
            return Err(VaccineCardValidationError::MissingName);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VaccineCardValidationError {
    #[error("Invalid name")]
    MissingName,
}
