//! Full-run orchestration: create the store, seed constituencies, enrich
//! MP details party by party, sweep the remaining seats, then load member
//! addresses. On any failure the database file is deleted before the
//! error propagates, so a failed run never leaves a store believed usable.

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::builder::members::build_member_contacts;
use crate::builder::twfy::{build_mp_and_office_lists, build_mp_and_offices};
use crate::fetch::{MembersClient, TwfyClient};
use crate::store::Store;
use crate::ui::{Phase, Ui};

/// Parties covered by the bulk `getMPs` pass. Seats not caught here are
/// picked up one by one in the straggler pass.
pub const MAJOR_PARTIES: &[&str] = &[
    "conservative",
    "labour",
    "liberal democrat",
    "green",
    "independent",
    "ukip",
    "DUP",
    "sinn fein",
    "sdlp",
    "plaid cymru",
    "scottish national party",
];

#[derive(Debug, Default)]
pub struct SetupSummary {
    pub constituencies: usize,
    pub mps_enriched: usize,
    pub offices: usize,
    pub addresses: usize,
}

#[derive(Debug, Default, Clone)]
pub struct SetupOptions {
    pub skip_addresses: bool,
}

pub fn run_setup(
    db_path: &Path,
    twfy: &TwfyClient,
    members: &MembersClient,
    ui: &mut impl Ui,
    opts: &SetupOptions,
) -> Result<SetupSummary> {
    let result = run_setup_inner(db_path, twfy, members, ui, opts);

    if result.is_err() && db_path.exists() {
        fs::remove_file(db_path).ok();
    }

    result
}

fn run_setup_inner(
    db_path: &Path,
    twfy: &TwfyClient,
    members: &MembersClient,
    ui: &mut impl Ui,
    opts: &SetupOptions,
) -> Result<SetupSummary> {
    let mut summary = SetupSummary::default();

    ui.set_phase(Phase::Creating);
    let mut store = Store::create(db_path)?;

    ui.set_phase(Phase::Seeding);
    let names = twfy.constituencies()?;
    summary.constituencies = store.seed_constituencies(&names)?;
    ui.log(format!("{} constituencies seeded", summary.constituencies));

    ui.set_phase(Phase::EnrichingMps);
    for (i, party) in MAJOR_PARTIES.iter().enumerate() {
        ui.set_progress(i as u64 + 1, MAJOR_PARTIES.len() as u64, *party);

        let raws = twfy.mps_by_party(party)?;
        let (mps, offices) = build_mp_and_office_lists(&raws)?;
        let report = store.enrich_mps(&mps, &offices)?;

        summary.mps_enriched += report.updated;
        summary.offices += report.inserted;
        for constituency in &report.unmatched {
            ui.log(format!("No seat row matched constituency {:?}", constituency));
        }
    }

    // getMPs misses seats held by smaller parties; query those directly
    ui.set_phase(Phase::Stragglers);
    for constituency in store.unenriched_constituencies()? {
        match twfy.mp_for_constituency(&constituency)? {
            Some(raw) => {
                let (mp, offices) = build_mp_and_offices(&raw)?;
                let report = store.enrich_mps(std::slice::from_ref(&mp), &offices)?;
                summary.mps_enriched += report.updated;
                summary.offices += report.inserted;
                for missed in &report.unmatched {
                    ui.log(format!("No seat row matched constituency {:?}", missed));
                }
            }
            None => ui.log(format!("{} has no sitting MP", constituency)),
        }
    }

    if !opts.skip_addresses {
        ui.set_phase(Phase::Addresses);
        let constituencies = store.constituencies()?;
        let total = constituencies.len() as u64;

        for (i, constituency) in constituencies.iter().enumerate() {
            ui.set_progress(i as u64 + 1, total, constituency.as_str());

            let xml = members.addresses_for_constituency(constituency)?;
            for contact in build_member_contacts(&xml)? {
                let report = store.enrich_addresses(&contact)?;
                summary.addresses += report.inserted;
                for missed in &report.unmatched {
                    ui.log(format!("No seat row matched constituency {:?}", missed));
                }
            }
        }
    }

    ui.set_phase(Phase::Complete);
    Ok(summary)
}
