//! Record builder for the TheyWorkForYou API.
//!
//! Maps raw `getMPs`/`getMP` payloads into the normalized rows the loader
//! writes: one seat row per MP plus zero or more office rows, each office
//! stamped with the MP's PersonId and name.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// One MP record as returned by the TWFY API.
///
/// `member_id` and `person_id` arrive as strings; the builder is where
/// they are required to be numeric.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMp {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub party: String,
    pub member_id: String,
    pub person_id: String,
    pub constituency: String,
    #[serde(default)]
    pub office: Vec<RawOffice>,
}

/// One office entry nested under an MP record
#[derive(Debug, Clone, Deserialize)]
pub struct RawOffice {
    pub dept: String,
    pub from_date: String,
    pub to_date: String,
    pub position: Option<String>,
}

/// Normalized seat-row update for MPCommons
#[derive(Debug, Clone, PartialEq)]
pub struct MpDetails {
    pub name: String,
    pub party: String,
    pub member_id: i64,
    pub person_id: i64,
    pub constituency: String,
}

/// Normalized office row for the Offices table
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeRecord {
    pub person_id: i64,
    /// Department name; empty for department-less offices (e.g. Speaker)
    pub office: String,
    pub start_date: String,
    /// "9999-12-31" means the office is ongoing
    pub end_date: String,
    pub holder: String,
    pub title: String,
}

/// Build the seat-row update and office rows for a single MP record.
///
/// A missing `office` list yields no office rows. A non-numeric
/// `member_id`/`person_id` is a hard error: the IDs are join keys and a
/// bad one means the source data is corrupt, not recoverable here.
pub fn build_mp_and_offices(raw: &RawMp) -> Result<(MpDetails, Vec<OfficeRecord>)> {
    let name = match (&raw.name, &raw.full_name) {
        (Some(n), _) => n.clone(),
        (None, Some(n)) => n.clone(),
        (None, None) => bail!("MP record for {} has no name", raw.constituency),
    };

    let member_id: i64 = raw
        .member_id
        .parse()
        .with_context(|| format!("Non-numeric member_id {:?} for {}", raw.member_id, name))?;
    let person_id: i64 = raw
        .person_id
        .parse()
        .with_context(|| format!("Non-numeric person_id {:?} for {}", raw.person_id, name))?;

    let mp = MpDetails {
        name: name.clone(),
        party: raw.party.clone(),
        member_id,
        person_id,
        constituency: raw.constituency.clone(),
    };

    let offices = raw
        .office
        .iter()
        .map(|job| OfficeRecord {
            person_id,
            office: job.dept.clone(),
            start_date: job.from_date.clone(),
            end_date: job.to_date.clone(),
            holder: name.clone(),
            // some offices carry no position; the department doubles as the title
            title: job.position.clone().unwrap_or_else(|| job.dept.clone()),
        })
        .collect();

    Ok((mp, offices))
}

/// Build flat MP and office lists from a batch of raw records
pub fn build_mp_and_office_lists(raws: &[RawMp]) -> Result<(Vec<MpDetails>, Vec<OfficeRecord>)> {
    let mut mps = Vec::with_capacity(raws.len());
    let mut offices = Vec::new();

    for raw in raws {
        let (mp, mut jobs) = build_mp_and_offices(raw)?;
        mps.push(mp);
        offices.append(&mut jobs);
    }

    Ok((mps, offices))
}
