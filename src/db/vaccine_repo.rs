use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

use super::{delete_with_records, lock};
use crate::models::Vaccine;
use crate::utils::{AppError, AppResult};

pub const DUPLICATE_VACCINE: &str = "Already exists a vaccine with the same name and manufacturer";

#[derive(Debug)]
pub struct VaccineRepository {
    conn: Arc<Mutex<Connection>>,
}

impl VaccineRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Hämta alla vacciner
    pub fn find_all(&self) -> AppResult<Vec<Vaccine>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT id, name, manufacturer FROM vaccines ORDER BY id")?;

        let vaccines = stmt
            .query_map([], Self::row_to_vaccine)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(vaccines)
    }

    /// Hämta vaccin via ID
    pub fn find_by_id(&self, id: i64) -> AppResult<Option<Vaccine>> {
        let conn = lock(&self.conn)?;
        let vaccine = conn
            .query_row(
                "SELECT id, name, manufacturer FROM vaccines WHERE id = ?",
                [id],
                Self::row_to_vaccine,
            )
            .optional()?;

        Ok(vaccine)
    }

    pub fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = lock(&self.conn)?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM vaccines WHERE id = ?)",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Kontrollera om kombinationen namn + tillverkare redan finns
    pub fn exists_with(&self, name: &str, manufacturer: &str) -> AppResult<bool> {
        let conn = lock(&self.conn)?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM vaccines WHERE name = ? AND manufacturer = ?)",
            params![name, manufacturer],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Skapa nytt vaccin
    pub fn create(&self, vaccine: &mut Vaccine) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO vaccines (name, manufacturer) VALUES (?1, ?2)",
            params![vaccine.name, vaccine.manufacturer],
        )
        .map_err(|e| AppError::from_insert(e, DUPLICATE_VACCINE))?;

        let id = conn.last_insert_rowid();
        vaccine.id = Some(id);

        Ok(id)
    }

    /// Ta bort vaccin och dess vaccinationer
    pub fn delete(&self, id: i64) -> AppResult<usize> {
        delete_with_records(&self.conn, "vaccines", "vaccine_id", id)
    }

    fn row_to_vaccine(row: &Row) -> rusqlite::Result<Vaccine> {
        Ok(Vaccine {
            id: row.get(0)?,
            name: row.get(1)?,
            manufacturer: row.get(2)?,
        })
    }
}
