use rusqlite::{Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

use super::{delete_with_records, lock};
use crate::models::VaccineCard;
use crate::utils::{AppError, AppResult};

pub const DUPLICATE_CARD: &str = "Already exists another vaccine card with this name";

#[derive(Debug)]
pub struct VaccineCardRepository {
    conn: Arc<Mutex<Connection>>,
}

impl VaccineCardRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Hämta alla vaccinationskort
    pub fn find_all(&self) -> AppResult<Vec<VaccineCard>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT id, name FROM vaccine_cards ORDER BY id")?;

        let cards = stmt
            .query_map([], Self::row_to_card)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cards)
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<Option<VaccineCard>> {
        let conn = lock(&self.conn)?;
        let card = conn
            .query_row(
                "SELECT id, name FROM vaccine_cards WHERE id = ?",
                [id],
                Self::row_to_card,
            )
            .optional()?;

        Ok(card)
    }

    pub fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = lock(&self.conn)?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM vaccine_cards WHERE id = ?)",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Kontrollera om namnet redan används
    pub fn is_name_taken(&self, name: &str) -> AppResult<bool> {
        let conn = lock(&self.conn)?;
        let taken: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM vaccine_cards WHERE name = ?)",
            [name],
            |row| row.get(0),
        )?;
        Ok(taken)
    }

    pub fn create(&self, card: &mut VaccineCard) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        conn.execute("INSERT INTO vaccine_cards (name) VALUES (?1)", [&card.name])
            .map_err(|e| AppError::from_insert(e, DUPLICATE_CARD))?;

        let id = conn.last_insert_rowid();
        card.id = Some(id);

        Ok(id)
    }

    /// Ta bort kort och dess vaccinationer
    pub fn delete(&self, id: i64) -> AppResult<usize> {
        delete_with_records(&self.conn, "vaccine_cards", "vaccine_card_id", id)
    }

    fn row_to_card(row: &Row) -> rusqlite::Result<VaccineCard> {
        Ok(VaccineCard {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}
