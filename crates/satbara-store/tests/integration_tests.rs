//! Integration tests for satbara-store
//!
//! These tests verify the append / list / clear cycle, in memory and on disk.

use satbara_domain::{
    LandArea, LandRevenue, OccupantDetail, RecordStore, SatBaraData,
};
use satbara_store::SqliteStore;
use serde_json::Number;
use std::time::{SystemTime, UNIX_EPOCH};

fn record(village: &str) -> SatBaraData {
    SatBaraData {
        village_name: Some(village.to_string()),
        district: Some("Pune".to_string()),
        survey_number: Some("45/2".to_string()),
        total_land_area: Some(LandArea {
            hectare: Number::from_f64(0.81),
            r: None,
            sq_meter: Some(Number::from(8100)),
        }),
        land_revenue: Some(LandRevenue::Text("₹ 4.50".to_string())),
        occupant_details: vec![OccupantDetail {
            name: "Ram Patil".to_string(),
            occupancy_type: None,
            area_share: Some("0.81".to_string()),
        }],
        mutation_entries: vec!["1201".to_string()],
        ..Default::default()
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().count().unwrap(), 0);
}

#[test]
fn test_append_assigns_identity_and_timestamp() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let before = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let stored = store
        .append(record("Wadgaon"), Some("satbara_45_2.jpg".to_string()))
        .unwrap();

    assert_eq!(stored.data, record("Wadgaon"));
    assert_eq!(stored.file_name.as_deref(), Some("satbara_45_2.jpg"));
    assert!(stored.extraction_timestamp >= before);

    let other = store.append(record("Wadgaon"), None).unwrap();
    assert_ne!(stored.id, other.id, "Each append gets a fresh id");
    assert_eq!(other.file_name, None);
}

#[test]
fn test_list_returns_insertion_order() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let villages = ["Wadgaon", "Karad", "Shirur", "Baramati"];
    let appended: Vec<_> = villages
        .iter()
        .map(|v| store.append(record(v), None).unwrap())
        .collect();

    let listed = store.list().unwrap();
    assert_eq!(listed, appended);

    let names: Vec<_> = listed
        .iter()
        .map(|r| r.data.village_name.as_deref().unwrap())
        .collect();
    assert_eq!(names, villages);
}

#[test]
fn test_payload_round_trips_every_field() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let stored = store.append(record("Wadgaon"), None).unwrap();

    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].data, stored.data);
    assert_eq!(
        listed[0].data.land_revenue,
        Some(LandRevenue::Text("₹ 4.50".to_string()))
    );

    let area = serde_json::to_value(&listed[0].data.total_land_area).unwrap();
    assert_eq!(area["sqMeter"].to_string(), "8100");
}

#[test]
fn test_clear_removes_everything() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.append(record("Wadgaon"), None).unwrap();
    store.append(record("Karad"), None).unwrap();

    assert_eq!(store.clear().unwrap(), 2);
    assert!(store.list().unwrap().is_empty());
    assert_eq!(store.count().unwrap(), 0);

    // Clearing an empty store is not an error
    assert_eq!(store.clear().unwrap(), 0);

    // Appends continue to work after a clear
    store.append(record("Shirur"), None).unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_records_persist_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");

    let stored = {
        let mut store = SqliteStore::new(&path).unwrap();
        store.append(record("Wadgaon"), Some("712.pdf".to_string())).unwrap()
    };

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.list().unwrap(), vec![stored]);
}

#[test]
fn test_stored_record_serializes_flat() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let stored = store.append(record("Wadgaon"), Some("712.jpg".to_string())).unwrap();

    let value = serde_json::to_value(&stored).unwrap();
    assert_eq!(value["id"], stored.id.to_string());
    assert_eq!(value["fileName"], "712.jpg");
    assert_eq!(value["villageName"], "Wadgaon");
    assert_eq!(value["occupantDetails"][0]["name"], "Ram Patil");
}
