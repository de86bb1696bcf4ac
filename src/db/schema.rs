//! SQL-schema för vaccinationsregistret

pub const SCHEMA_VERSION: i32 = 2;

pub const CREATE_TABLES: &str = r#"
-- Personer
CREATE TABLE IF NOT EXISTS persons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    cpf TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    CHECK (name <> ''),
    CHECK (length(cpf) = 11)
);

CREATE INDEX IF NOT EXISTS idx_persons_name ON persons(name COLLATE NOCASE);

-- Vacciner
CREATE TABLE IF NOT EXISTS vaccines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    manufacturer TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    CHECK (name <> '' AND manufacturer <> ''),
    UNIQUE (name, manufacturer)
);

-- Vaccinationskort
CREATE TABLE IF NOT EXISTS vaccine_cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    CHECK (name <> '')
);

-- Vaccinationer
CREATE TABLE IF NOT EXISTS vaccine_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL,
    vaccine_id INTEGER NOT NULL,
    vaccine_card_id INTEGER NOT NULL,
    dose INTEGER NOT NULL,
    application_date TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    FOREIGN KEY (person_id) REFERENCES persons(id) ON DELETE CASCADE,
    FOREIGN KEY (vaccine_id) REFERENCES vaccines(id) ON DELETE CASCADE,
    FOREIGN KEY (vaccine_card_id) REFERENCES vaccine_cards(id) ON DELETE CASCADE,
    CHECK (dose BETWEEN 1 AND 5)
);

CREATE INDEX IF NOT EXISTS idx_records_person ON vaccine_records(person_id);
CREATE INDEX IF NOT EXISTS idx_records_vaccine ON vaccine_records(vaccine_id);
CREATE INDEX IF NOT EXISTS idx_records_card ON vaccine_records(vaccine_card_id);

-- Migrationshistorik
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
