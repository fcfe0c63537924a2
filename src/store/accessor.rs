//! Read-only typed views over the joined tables.
//!
//! Nested collections are loaded per MP in rowid (insertion) order and
//! are empty vecs, never absent, when no child rows exist.

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use super::Store;

/// One office held by a person
#[derive(Debug, Clone, PartialEq)]
pub struct Office {
    pub person_id: i64,
    pub office: String,
    pub start_date: String,
    pub end_date: String,
    pub holder: String,
    pub title: String,
}

/// One retained contact address
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub official_id: i64,
    pub address_type: String,
    pub address: String,
}

/// A seat row with its child collections
#[derive(Debug, Clone, PartialEq)]
pub struct Mp {
    pub name: Option<String>,
    pub constituency: String,
    pub is_mp: bool,
    pub party: Option<String>,
    pub image_url: Option<String>,
    pub member_id: Option<i64>,
    pub person_id: Option<i64>,
    pub official_id: Option<i64>,
    pub offices: Vec<Office>,
    pub addresses: Vec<Address>,
}

const SEAT_COLUMNS: &str =
    "Name, Constituency, MP, Party, ImageUrl, MemberId, PersonId, OfficialId";

fn seat_from_row(row: &Row) -> rusqlite::Result<Mp> {
    Ok(Mp {
        name: row.get(0)?,
        constituency: row.get(1)?,
        is_mp: row.get(2)?,
        party: row.get(3)?,
        image_url: row.get(4)?,
        member_id: row.get(5)?,
        person_id: row.get(6)?,
        official_id: row.get(7)?,
        offices: Vec::new(),
        addresses: Vec::new(),
    })
}

impl Store {
    /// All constituency names in insertion order
    pub fn constituencies(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT Constituency FROM MPCommons")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<rusqlite::Result<Vec<String>>>()
            .context("Failed to read constituencies")
    }

    /// MP aggregates for the given OfficialIds, in request order.
    /// An ID with no matching row contributes nothing.
    pub fn mps_by_official_id(&self, official_ids: &[i64]) -> Result<Vec<Mp>> {
        let sql = format!("SELECT {} FROM MPCommons WHERE OfficialId=?1", SEAT_COLUMNS);
        let mut mps = Vec::new();

        for id in official_ids {
            let seat = self
                .conn
                .query_row(&sql, params![id], seat_from_row)
                .optional()
                .with_context(|| format!("Failed to look up OfficialId {}", id))?;

            if let Some(mut mp) = seat {
                self.attach_children(&mut mp)?;
                mps.push(mp);
            }
        }

        Ok(mps)
    }

    /// All MPs that have at least one retained address row
    pub fn mps_with_social_address(&self) -> Result<Vec<Mp>> {
        let sql = format!(
            "SELECT {} FROM MPCommons
             WHERE OfficialId IN (SELECT DISTINCT OfficialId FROM Addresses)",
            SEAT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut mps = stmt
            .query_map([], seat_from_row)?
            .collect::<rusqlite::Result<Vec<Mp>>>()
            .context("Failed to read MPs with addresses")?;

        for mp in &mut mps {
            self.attach_children(mp)?;
        }

        Ok(mps)
    }

    fn attach_children(&self, mp: &mut Mp) -> Result<()> {
        if let Some(person_id) = mp.person_id {
            let mut stmt = self.conn.prepare_cached(
                "SELECT PersonId, Office, StartDate, EndDate, Name, Title
                 FROM Offices WHERE PersonId=?1",
            )?;
            mp.offices = stmt
                .query_map(params![person_id], |row| {
                    Ok(Office {
                        person_id: row.get(0)?,
                        office: row.get(1)?,
                        start_date: row.get(2)?,
                        end_date: row.get(3)?,
                        holder: row.get(4)?,
                        title: row.get(5)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<Office>>>()
                .context("Failed to read offices")?;
        }

        if let Some(official_id) = mp.official_id {
            let mut stmt = self.conn.prepare_cached(
                "SELECT OfficialId, AddressType, Address FROM Addresses WHERE OfficialId=?1",
            )?;
            mp.addresses = stmt
                .query_map(params![official_id], |row| {
                    Ok(Address {
                        official_id: row.get(0)?,
                        address_type: row.get(1)?,
                        address: row.get(2)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<Address>>>()
                .context("Failed to read addresses")?;
        }

        Ok(())
    }
}
