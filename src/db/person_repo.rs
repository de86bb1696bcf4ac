use rusqlite::{Connection, OptionalExtension, Row};
use serde::Deserialize;
use std::sync::{Arc, Mutex};

use super::{delete_with_records, lock};
use crate::models::Person;
use crate::utils::{AppError, AppResult};

pub const DUPLICATE_CPF: &str = "A person with this cpf already exists";

/// Sökfilter för personlistan
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PersonFilter {
    /// Del av namnet, skiftlägesokänsligt
    pub name: Option<String>,
    /// Exakt CPF
    pub cpf: Option<String>,
}

impl PersonFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_cpf(mut self, cpf: impl Into<String>) -> Self {
        self.cpf = Some(cpf.into());
        self
    }

    fn name_needle(&self) -> Option<String> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase)
    }

    fn cpf_value(&self) -> Option<&str> {
        self.cpf.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug)]
pub struct PersonRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PersonRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Hämta alla personer
    pub fn find_all(&self) -> AppResult<Vec<Person>> {
        self.list(&PersonFilter::default())
    }

    /// Hämta personer som matchar filtret
    pub fn list(&self, filter: &PersonFilter) -> AppResult<Vec<Person>> {
        let conn = lock(&self.conn)?;

        let mut persons: Vec<Person> = match filter.cpf_value() {
            Some(cpf) => {
                let mut stmt =
                    conn.prepare("SELECT id, name, cpf FROM persons WHERE cpf = ? ORDER BY id")?;
                let rows = stmt.query_map([cpf], Self::row_to_person)?;
                rows.collect::<Result<_, _>>()?
            }
            None => {
                let mut stmt = conn.prepare("SELECT id, name, cpf FROM persons ORDER BY id")?;
                let rows = stmt.query_map([], Self::row_to_person)?;
                rows.collect::<Result<_, _>>()?
            }
        };

        // SQLite:s LOWER hanterar bara ASCII, så namnfiltret körs här
        if let Some(needle) = filter.name_needle() {
            persons.retain(|p| p.name.to_lowercase().contains(&needle));
        }

        Ok(persons)
    }

    /// Hämta person via ID
    pub fn find_by_id(&self, id: i64) -> AppResult<Option<Person>> {
        let conn = lock(&self.conn)?;
        let person = conn
            .query_row(
                "SELECT id, name, cpf FROM persons WHERE id = ?",
                [id],
                Self::row_to_person,
            )
            .optional()?;

        Ok(person)
    }

    /// Hämta person via CPF
    pub fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Person>> {
        let conn = lock(&self.conn)?;
        let person = conn
            .query_row(
                "SELECT id, name, cpf FROM persons WHERE cpf = ?",
                [cpf],
                Self::row_to_person,
            )
            .optional()?;

        Ok(person)
    }

    pub fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = lock(&self.conn)?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM persons WHERE id = ?)",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Kontrollera om CPF redan används
    pub fn is_cpf_taken(&self, cpf: &str) -> AppResult<bool> {
        let conn = lock(&self.conn)?;
        let taken: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM persons WHERE cpf = ?)",
            [cpf],
            |row| row.get(0),
        )?;
        Ok(taken)
    }

    /// Skapa ny person
    pub fn create(&self, person: &mut Person) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO persons (name, cpf) VALUES (?1, ?2)",
            [&person.name, &person.cpf],
        )
        .map_err(|e| AppError::from_insert(e, DUPLICATE_CPF))?;

        let id = conn.last_insert_rowid();
        person.id = Some(id);

        Ok(id)
    }

    /// Ta bort person och dess vaccinationer. Returnerar antal borttagna vaccinationer.
    pub fn delete(&self, id: i64) -> AppResult<usize> {
        delete_with_records(&self.conn, "persons", "person_id", id)
    }

    /// Räkna antal personer
    pub fn count(&self) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_person(row: &Row) -> rusqlite::Result<Person> {
        Ok(Person {
            id: row.get(0)?,
            name: row.get(1)?,
            cpf: row.get(2)?,
        })
    }
}
