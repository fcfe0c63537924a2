//! Write paths: constituency seeding and the two enrichment passes.
//!
//! Each entry point wraps its statements in one transaction so a load
//! step is all-or-nothing. There is no cross-step transaction; a failed
//! run is recovered by the pipeline deleting the store.

use anyhow::{Context, Result};
use rusqlite::params;

use super::Store;
use crate::builder::members::MemberContact;
use crate::builder::twfy::{MpDetails, OfficeRecord};

/// Outcome of one enrichment step.
///
/// `unmatched` is the warning channel for natural-key misses: an UPDATE
/// against a constituency with no seat row affects zero rows and lands
/// here instead of erroring or disappearing.
#[derive(Debug, Default)]
pub struct EnrichReport {
    /// Seat rows updated
    pub updated: usize,
    /// Child rows actually inserted (re-runs insert nothing)
    pub inserted: usize,
    /// Constituency names with no matching seat row
    pub unmatched: Vec<String>,
}

impl Store {
    /// Replace the seat table with one placeholder row per constituency.
    /// Idempotent from any state.
    pub fn seed_constituencies(&mut self, names: &[String]) -> Result<usize> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM MPCommons", [])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO MPCommons VALUES (NULL, ?1, 0, NULL, NULL, NULL, NULL, NULL)",
            )?;
            for name in names {
                stmt.execute(params![name])
                    .with_context(|| format!("Failed to seed constituency {:?}", name))?;
            }
        }

        tx.commit()?;
        Ok(names.len())
    }

    /// Fill in identity/party fields on seat rows and append office rows.
    ///
    /// Seat rows are located by constituency name, the natural key shared
    /// by both sources. Office rows go through INSERT OR IGNORE against
    /// their natural-key index, so re-running cannot duplicate them.
    pub fn enrich_mps(
        &mut self,
        mps: &[MpDetails],
        offices: &[OfficeRecord],
    ) -> Result<EnrichReport> {
        let tx = self.conn.transaction()?;
        let mut report = EnrichReport::default();

        {
            let mut update = tx.prepare_cached(
                "UPDATE MPCommons SET Name=?1, Party=?2, MP=1, MemberId=?3, PersonId=?4
                 WHERE Constituency=?5",
            )?;
            for mp in mps {
                let affected = update.execute(params![
                    mp.name,
                    mp.party,
                    mp.member_id,
                    mp.person_id,
                    mp.constituency
                ])?;
                if affected == 0 {
                    report.unmatched.push(mp.constituency.clone());
                } else {
                    report.updated += affected;
                }
            }

            let mut insert = tx.prepare_cached(
                "INSERT OR IGNORE INTO Offices VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for office in offices {
                report.inserted += insert.execute(params![
                    office.person_id,
                    office.office,
                    office.start_date,
                    office.end_date,
                    office.holder,
                    office.title
                ])?;
            }
        }

        tx.commit()?;
        Ok(report)
    }

    /// Stamp the member-directory OfficialId on a seat row and append the
    /// member's social address rows.
    pub fn enrich_addresses(&mut self, contact: &MemberContact) -> Result<EnrichReport> {
        let official_id: i64 = contact.official_id.parse().with_context(|| {
            format!(
                "Non-numeric Member_Id {:?} for {}",
                contact.official_id, contact.constituency
            )
        })?;

        let tx = self.conn.transaction()?;
        let mut report = EnrichReport::default();

        let affected = tx.execute(
            "UPDATE MPCommons SET OfficialId=?1 WHERE Constituency=?2",
            params![official_id, contact.constituency],
        )?;
        if affected == 0 {
            report.unmatched.push(contact.constituency.clone());
        } else {
            report.updated = affected;
        }

        {
            let mut insert =
                tx.prepare_cached("INSERT OR IGNORE INTO Addresses VALUES (?1, ?2, ?3)")?;
            for (addr_type, address) in &contact.addresses {
                report.inserted += insert.execute(params![official_id, addr_type, address])?;
            }
        }

        tx.commit()?;
        Ok(report)
    }

    /// Constituencies whose seat row has not been enriched yet
    pub fn unenriched_constituencies(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT Constituency FROM MPCommons WHERE MP=0")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<rusqlite::Result<Vec<String>>>()
            .context("Failed to read unenriched constituencies")
    }
}
