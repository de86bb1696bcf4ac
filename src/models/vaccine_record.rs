use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::date::format_short_date;

/// Dosnummer för en vaccination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(i32)]
pub enum Dose {
    First = 1,
    Second = 2,
    Third = 3,
    FirstBooster = 4,
    SecondBooster = 5,
}

impl Dose {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::First => "1st dose",
            Self::Second => "2nd dose",
            Self::Third => "3rd dose",
            Self::FirstBooster => "1st booster",
            Self::SecondBooster => "2nd booster",
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            4 => Some(Self::FirstBooster),
            5 => Some(Self::SecondBooster),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::First,
            Self::Second,
            Self::Third,
            Self::FirstBooster,
            Self::SecondBooster,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid dose. Use: 1, 2, 3, 4 or 5")]
pub struct InvalidDose;

impl TryFrom<i64> for Dose {
    type Error = InvalidDose;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_i64(value).ok_or(InvalidDose)
    }
}

impl From<Dose> for i64 {
    fn from(dose: Dose) -> Self {
        dose as i64
    }
}

/// En vaccination: person + vaccin + kort + dos + datum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineRecord {
    pub id: Option<i64>,
    pub person_id: i64,
    pub vaccine_id: i64,
    pub vaccine_card_id: i64,
    pub dose: Dose,
    pub application_date: DateTime<Utc>,
}

impl VaccineRecord {
    pub fn new(person_id: i64, vaccine_id: i64, vaccine_card_id: i64, dose: Dose) -> Self {
        Self {
            id: None,
            person_id,
            vaccine_id,
            vaccine_card_id,
            dose,
            application_date: Utc::now(),
        }
    }

    pub fn with_application_date(mut self, date: DateTime<Utc>) -> Self {
        self.application_date = date;
        self
    }
}

/// Inkommande registrering. Dosen hålls rå så att ogiltiga värden ger
/// valideringsfelet i stället för ett tolkningsfel.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewVaccineRecord {
    pub person_id: i64,
    pub vaccine_id: i64,
    pub vaccine_card_id: i64,
    pub dose: i64,
    pub application_date: Option<String>,
}

/// En rad i en persons vaccinationshistorik
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub vaccine: String,
    pub manufacturer: String,
    pub vaccine_card_id: i64,
    pub vaccine_card: String,
    pub dose: Dose,
    pub dose_label: &'static str,
    /// Kort datum (YYYY-MM-DD), heter `data` i JSON
    #[serde(rename = "data")]
    pub date: String,
    pub application_date: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        id: i64,
        vaccine: String,
        manufacturer: String,
        vaccine_card_id: i64,
        vaccine_card: String,
        dose: Dose,
        application_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            vaccine,
            manufacturer,
            vaccine_card_id,
            vaccine_card,
            dose,
            dose_label: dose.display_name(),
            date: format_short_date(application_date),
            application_date,
        }
    }
}

/// Historik för ett vaccinationskort
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHistory {
    pub card_id: i64,
    pub card_name: String,
    pub records: Vec<HistoryEntry>,
}
