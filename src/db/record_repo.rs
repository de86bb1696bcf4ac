use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use serde::Deserialize;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::models::{CardHistory, Dose, HistoryEntry, VaccineRecord};
use crate::utils::{AppError, AppResult};

impl ToSql for Dose {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(*self)))
    }
}

impl FromSql for Dose {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = i64::column_result(value)?;
        Dose::from_i64(raw).ok_or(FromSqlError::OutOfRange(raw))
    }
}

/// Filter för vaccinationslistan
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordFilter {
    pub person_id: Option<i64>,
}

#[derive(Debug)]
pub struct RecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RecordRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Hämta alla vaccinationer
    pub fn find_all(&self) -> AppResult<Vec<VaccineRecord>> {
        self.list(&RecordFilter::default())
    }

    pub fn list(&self, filter: &RecordFilter) -> AppResult<Vec<VaccineRecord>> {
        let conn = lock(&self.conn)?;

        let records = match filter.person_id {
            Some(person_id) => {
                let mut stmt = conn.prepare(
                    "SELECT id, person_id, vaccine_id, vaccine_card_id, dose, application_date
                     FROM vaccine_records
                     WHERE person_id = ?
                     ORDER BY application_date, id",
                )?;
                let rows = stmt.query_map([person_id], Self::row_to_record)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, person_id, vaccine_id, vaccine_card_id, dose, application_date
                     FROM vaccine_records
                     ORDER BY id",
                )?;
                let rows = stmt.query_map([], Self::row_to_record)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(records)
    }

    /// Hämta vaccination via ID
    pub fn find_by_id(&self, id: i64) -> AppResult<Option<VaccineRecord>> {
        let conn = lock(&self.conn)?;
        let record = conn
            .query_row(
                "SELECT id, person_id, vaccine_id, vaccine_card_id, dose, application_date
                 FROM vaccine_records WHERE id = ?",
                [id],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    /// Registrera vaccination
    pub fn create(&self, record: &mut VaccineRecord) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO vaccine_records (person_id, vaccine_id, vaccine_card_id, dose, application_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.person_id,
                record.vaccine_id,
                record.vaccine_card_id,
                record.dose,
                record.application_date,
            ],
        )?;

        let id = conn.last_insert_rowid();
        record.id = Some(id);

        Ok(id)
    }

    /// Ta bort vaccination
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let conn = lock(&self.conn)?;
        let rows = conn.execute("DELETE FROM vaccine_records WHERE id = ?", [id])?;

        if rows == 0 {
            return Err(AppError::not_found_empty());
        }

        Ok(())
    }

    /// Räkna vaccinationer för en person
    pub fn count_by_person(&self, person_id: i64) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM vaccine_records WHERE person_id = ?",
            [person_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Hämta en persons vaccinationshistorik med vaccin- och kortnamn
    pub fn find_history_by_person(&self, person_id: i64) -> AppResult<Vec<HistoryEntry>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT r.id, v.name, v.manufacturer, c.id, c.name, r.dose, r.application_date
             FROM vaccine_records r
             JOIN vaccines v ON v.id = r.vaccine_id
             JOIN vaccine_cards c ON c.id = r.vaccine_card_id
             WHERE r.person_id = ?
             ORDER BY r.application_date, r.id",
        )?;

        let entries = stmt
            .query_map([person_id], |row| {
                Ok(HistoryEntry::new(
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Hämta historik grupperad per vaccinationskort, korten sorterade på namn
    pub fn find_history_grouped(&self, person_id: i64) -> AppResult<Vec<CardHistory>> {
        let entries = self.find_history_by_person(person_id)?;

        let mut grouped: Vec<CardHistory> = Vec::new();

        for entry in entries {
            match grouped.iter_mut().find(|g| g.card_id == entry.vaccine_card_id) {
                Some(group) => group.records.push(entry),
                None => grouped.push(CardHistory {
                    card_id: entry.vaccine_card_id,
                    card_name: entry.vaccine_card.clone(),
                    records: vec![entry],
                }),
            }
        }

        grouped.sort_by(|a, b| a.card_name.cmp(&b.card_name));

        Ok(grouped)
    }

    fn row_to_record(row: &Row) -> rusqlite::Result<VaccineRecord> {
        Ok(VaccineRecord {
            id: row.get(0)?,
            person_id: row.get(1)?,
            vaccine_id: row.get(2)?,
            vaccine_card_id: row.get(3)?,
            dose: row.get(4)?,
            application_date: row.get(5)?,
        })
    }
}
