//! Seed -> enrich -> query scenarios against temp databases.
//!
//! No network: the loader and accessor are exercised directly with
//! builder-shaped records. One test drives the full pipeline against an
//! unreachable host to check the failed-run cleanup.

use std::collections::BTreeMap;
use std::path::PathBuf;

use parl_to_sqlite::builder::members::MemberContact;
use parl_to_sqlite::builder::twfy::{MpDetails, OfficeRecord};
use parl_to_sqlite::fetch::{MembersClient, TwfyClient};
use parl_to_sqlite::pipeline::{run_setup, SetupOptions};
use parl_to_sqlite::store::Store;
use parl_to_sqlite::ui::SilentUi;
use tempfile::TempDir;

fn temp_db() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("parl.db");
    (dir, path)
}

fn seed_names() -> Vec<String> {
    vec!["Ceredigion".to_string(), "York Outer".to_string()]
}

fn mark_williams() -> MpDetails {
    MpDetails {
        name: "Mark Williams".into(),
        party: "Liberal Democrat".into(),
        member_id: 40728,
        person_id: 11489,
        constituency: "Ceredigion".into(),
    }
}

fn welsh_affairs_office() -> OfficeRecord {
    OfficeRecord {
        person_id: 11489,
        office: "Welsh Affairs Committee".into(),
        start_date: "2015-07-13".into(),
        end_date: "9999-12-31".into(),
        holder: "Mark Williams".into(),
        title: "Member".into(),
    }
}

fn mark_williams_contact() -> MemberContact {
    let mut addresses = BTreeMap::new();
    addresses.insert(
        "twitter".to_string(),
        "https://twitter.com/mark4ceredigion".to_string(),
    );
    addresses.insert(
        "website".to_string(),
        "http://www.markwilliams.org.uk/".to_string(),
    );
    MemberContact {
        official_id: "1498".into(),
        name: "Mr Mark Williams".into(),
        constituency: "Ceredigion".into(),
        addresses,
    }
}

#[test]
fn seeding_is_idempotent() {
    let (_dir, path) = temp_db();
    let mut store = Store::create(&path).unwrap();

    let names = seed_names();
    store.seed_constituencies(&names).unwrap();
    store.seed_constituencies(&names).unwrap();

    let seats = store.constituencies().unwrap();
    assert_eq!(seats, names);

    // placeholder rows stay untouched by reseeding
    let mps = store.mps_by_official_id(&[1498]).unwrap();
    assert!(mps.is_empty());
}

#[test]
fn enrichment_with_unknown_constituency_affects_no_rows() {
    let (_dir, path) = temp_db();
    let mut store = Store::create(&path).unwrap();
    store.seed_constituencies(&seed_names()).unwrap();

    let mut stray = mark_williams();
    stray.constituency = "Ceredigion and Mid Wales".into();

    let report = store.enrich_mps(&[stray], &[]).unwrap();
    assert_eq!(report.updated, 0);
    assert_eq!(report.unmatched, vec!["Ceredigion and Mid Wales".to_string()]);

    // no new seat row was created
    assert_eq!(store.constituencies().unwrap().len(), 2);
}

#[test]
fn end_to_end_enrich_and_query_by_official_id() {
    let (_dir, path) = temp_db();
    let mut store = Store::create(&path).unwrap();
    store.seed_constituencies(&seed_names()).unwrap();

    let report = store
        .enrich_mps(&[mark_williams()], &[welsh_affairs_office()])
        .unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.inserted, 1);
    assert!(report.unmatched.is_empty());

    let report = store.enrich_addresses(&mark_williams_contact()).unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.inserted, 2);

    let mps = store.mps_by_official_id(&[1498]).unwrap();
    assert_eq!(mps.len(), 1);

    let mp = &mps[0];
    assert_eq!(mp.name.as_deref(), Some("Mark Williams"));
    assert_eq!(mp.party.as_deref(), Some("Liberal Democrat"));
    assert_eq!(mp.constituency, "Ceredigion");
    assert!(mp.is_mp);
    assert_eq!(mp.member_id, Some(40728));
    assert_eq!(mp.person_id, Some(11489));
    assert_eq!(mp.official_id, Some(1498));

    assert_eq!(mp.offices.len(), 1);
    assert_eq!(mp.offices[0].office, "Welsh Affairs Committee");
    assert_eq!(mp.offices[0].title, "Member");
    assert_eq!(mp.offices[0].end_date, "9999-12-31");

    assert_eq!(mp.addresses.len(), 2);
}

#[test]
fn unknown_official_id_yields_empty_result() {
    let (_dir, path) = temp_db();
    let mut store = Store::create(&path).unwrap();
    store.seed_constituencies(&seed_names()).unwrap();
    store
        .enrich_mps(&[mark_williams()], &[welsh_affairs_office()])
        .unwrap();
    store.enrich_addresses(&mark_williams_contact()).unwrap();

    let mps = store.mps_by_official_id(&[99999]).unwrap();
    assert!(mps.is_empty());

    // present + absent: only the present one comes back
    let mps = store.mps_by_official_id(&[99999, 1498]).unwrap();
    assert_eq!(mps.len(), 1);
    assert_eq!(mps[0].official_id, Some(1498));
}

#[test]
fn rerunning_enrichment_does_not_duplicate_child_rows() {
    let (_dir, path) = temp_db();
    let mut store = Store::create(&path).unwrap();
    store.seed_constituencies(&seed_names()).unwrap();

    store
        .enrich_mps(&[mark_williams()], &[welsh_affairs_office()])
        .unwrap();
    store.enrich_addresses(&mark_williams_contact()).unwrap();

    // second pass reapplies the same values
    let report = store
        .enrich_mps(&[mark_williams()], &[welsh_affairs_office()])
        .unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.inserted, 0);

    let report = store.enrich_addresses(&mark_williams_contact()).unwrap();
    assert_eq!(report.inserted, 0);

    let mps = store.mps_by_official_id(&[1498]).unwrap();
    assert_eq!(mps[0].offices.len(), 1);
    assert_eq!(mps[0].addresses.len(), 2);
}

#[test]
fn social_address_query_skips_mps_without_addresses() {
    let (_dir, path) = temp_db();
    let mut store = Store::create(&path).unwrap();
    store.seed_constituencies(&seed_names()).unwrap();

    let york = MpDetails {
        name: "Julian Sturdy".into(),
        party: "Conservative".into(),
        member_id: 41326,
        person_id: 24853,
        constituency: "York Outer".into(),
    };

    store
        .enrich_mps(&[mark_williams(), york], &[welsh_affairs_office()])
        .unwrap();
    store.enrich_addresses(&mark_williams_contact()).unwrap();

    let mps = store.mps_with_social_address().unwrap();
    assert_eq!(mps.len(), 1);
    assert_eq!(mps[0].constituency, "Ceredigion");
    assert_eq!(mps[0].addresses.len(), 2);
    assert_eq!(mps[0].addresses[0].address_type, "twitter");
}

#[test]
fn contact_with_empty_address_map_still_stamps_official_id() {
    let (_dir, path) = temp_db();
    let mut store = Store::create(&path).unwrap();
    store.seed_constituencies(&seed_names()).unwrap();
    store.enrich_mps(&[mark_williams()], &[]).unwrap();

    let contact = MemberContact {
        official_id: "1498".into(),
        name: "Mr Mark Williams".into(),
        constituency: "Ceredigion".into(),
        addresses: BTreeMap::new(),
    };

    let report = store.enrich_addresses(&contact).unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.inserted, 0);

    let mps = store.mps_by_official_id(&[1498]).unwrap();
    assert_eq!(mps.len(), 1);
    assert!(mps[0].addresses.is_empty());
}

#[test]
fn non_numeric_official_id_is_an_error() {
    let (_dir, path) = temp_db();
    let mut store = Store::create(&path).unwrap();
    store.seed_constituencies(&seed_names()).unwrap();

    let mut contact = mark_williams_contact();
    contact.official_id = "MP-1498".into();

    assert!(store.enrich_addresses(&contact).is_err());
}

#[test]
fn create_replaces_an_existing_database() {
    let (_dir, path) = temp_db();

    let mut store = Store::create(&path).unwrap();
    store.seed_constituencies(&seed_names()).unwrap();
    drop(store);

    let store = Store::create(&path).unwrap();
    assert!(store.constituencies().unwrap().is_empty());
}

#[test]
fn failed_run_deletes_the_store() {
    let (_dir, path) = temp_db();

    // nothing listens here, so the seeding fetch fails fast
    let twfy = TwfyClient::with_base_url("key", "http://127.0.0.1:9").unwrap();
    let members = MembersClient::with_base_url("http://127.0.0.1:9").unwrap();
    let mut ui = SilentUi::new();

    let result = run_setup(&path, &twfy, &members, &mut ui, &SetupOptions::default());
    assert!(result.is_err());
    assert!(!path.exists());
}
