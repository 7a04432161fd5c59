//! SQL schema for the steward SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS properties (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS emails (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    address TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS agreements (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    property         TEXT NOT NULL,   -- properties.name; checked at write time, no FK
    service_type     TEXT NOT NULL,
    vendor           TEXT NOT NULL,
    start_date       TEXT NOT NULL,   -- ISO 8601 calendar date
    end_date         TEXT NOT NULL,   -- ISO 8601 calendar date
    price            REAL NOT NULL CHECK (price >= 0),
    increase_percent REAL NOT NULL CHECK (increase_percent >= 0),
    status           TEXT NOT NULL    -- 'Active' | 'Completed' | 'Archived'
);

CREATE INDEX IF NOT EXISTS agreements_status_idx   ON agreements(status);
CREATE INDEX IF NOT EXISTS agreements_property_idx ON agreements(property);
CREATE INDEX IF NOT EXISTS agreements_end_date_idx ON agreements(end_date);

PRAGMA user_version = 1;
";
