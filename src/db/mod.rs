pub mod schema;
pub mod migrations;
pub mod person_repo;
pub mod vaccine_repo;
pub mod vaccine_card_repo;
pub mod record_repo;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::utils::{AppError, AppResult};

pub use person_repo::{PersonFilter, PersonRepository};
pub use vaccine_repo::VaccineRepository;
pub use vaccine_card_repo::VaccineCardRepository;
pub use record_repo::{RecordFilter, RecordRepository};

/// Huvuddatabas-wrapper med thread-safe access
#[derive(Debug)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Öppna eller skapa databas
    pub fn open(path: &Path) -> AppResult<Self> {
        // Skapa katalog om den inte finns
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;
            ",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Öppna in-memory databas (för tester)
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Kör databasmigrationer
    pub fn migrate(&self) -> AppResult<()> {
        let conn = lock(&self.conn)?;
        migrations::run_migrations(&conn)
    }

    pub fn persons(&self) -> PersonRepository {
        PersonRepository::new(Arc::clone(&self.conn))
    }

    pub fn vaccines(&self) -> VaccineRepository {
        VaccineRepository::new(Arc::clone(&self.conn))
    }

    pub fn vaccine_cards(&self) -> VaccineCardRepository {
        VaccineCardRepository::new(Arc::clone(&self.conn))
    }

    pub fn records(&self) -> RecordRepository {
        RecordRepository::new(Arc::clone(&self.conn))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

/// Lås connection, ett förgiftat lås blir ett internt fel
pub(crate) fn lock(conn: &Mutex<Connection>) -> AppResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| AppError::other("Databaslåset är förgiftat"))
}

/// Ta bort en post och alla vaccinationer som refererar den, i en transaktion.
///
/// Returnerar antalet borttagna vaccinationer. Saknas posten blir det
/// `NotFound` utan meddelande och inget tas bort.
pub(crate) fn delete_with_records(
    conn: &Mutex<Connection>,
    table: &str,
    record_column: &str,
    id: i64,
) -> AppResult<usize> {
    let mut conn = lock(conn)?;
    let tx = conn.transaction()?;

    let removed_records = tx.execute(
        &format!("DELETE FROM vaccine_records WHERE {} = ?", record_column),
        [id],
    )?;
    let rows = tx.execute(&format!("DELETE FROM {} WHERE id = ?", table), [id])?;

    if rows == 0 {
        // Transaktionen rullas tillbaka när den släpps
        return Err(AppError::not_found_empty());
    }

    tx.commit()?;
    Ok(removed_records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    #[test]
    fn test_open_on_disk_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("vacinas.db");

        {
            let db = Database::open(&path).unwrap();
            db.migrate().unwrap();
            let mut person = Person::new("Ana", "52998224725");
            db.persons().create(&mut person).unwrap();
        }

        assert!(path.exists());

        // Data finns kvar efter återöppning
        let db = Database::open(&path).unwrap();
        db.migrate().unwrap();
        assert_eq!(db.persons().count().unwrap(), 1);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::open_in_memory().unwrap();
        let enabled: bool = lock(&db.conn)
            .unwrap()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert!(enabled);
    }
}
