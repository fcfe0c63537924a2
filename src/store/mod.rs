pub mod accessor;
pub mod loader;

pub use accessor::*;
pub use loader::*;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Seat, office and address tables. No SQL foreign keys; joins are
/// application-level. The unique indexes are the natural keys that make
/// re-running enrichment safe.
const SCHEMA_SQL: &str = "
    CREATE TABLE MPCommons (
        Name         TEXT,
        Constituency TEXT NOT NULL UNIQUE,
        MP           INTEGER NOT NULL DEFAULT 0,
        Party        TEXT,
        ImageUrl     TEXT,
        MemberId     INTEGER,
        PersonId     INTEGER,
        OfficialId   INTEGER
    );
    CREATE TABLE Offices (
        PersonId  INTEGER,
        Office    TEXT,
        StartDate TEXT,
        EndDate   TEXT,
        Name      TEXT,
        Title     TEXT
    );
    CREATE TABLE Addresses (
        OfficialId  INTEGER,
        AddressType TEXT,
        Address     TEXT
    );
    CREATE UNIQUE INDEX idx_offices_natural
        ON Offices(PersonId, Office, StartDate, Title);
    CREATE UNIQUE INDEX idx_addresses_natural
        ON Addresses(OfficialId, AddressType);
";

/// Handle on the parliamentary database. Created once at setup and passed
/// by reference to every component; nothing touches the file behind it.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Create a fresh database, removing any existing file first
    pub fn create(db_path: &Path) -> Result<Self> {
        if db_path.exists() {
            std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        }

        let conn = Connection::open(db_path).context("Failed to create database")?;
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to create schema")?;

        Ok(Self { conn })
    }

    /// Open an existing database without recreating it
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?;
        Ok(Self { conn })
    }
}
