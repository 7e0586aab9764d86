use chrono::{NaiveDate, NaiveTime};
use goldie_hub::models::LogType;
use goldie_hub::tracker::{self, ApartmentDraft};
use goldie_hub::{Collection, DailyLogEntry, Hub, SqliteStore, Store, seed};
use pretty_assertions::assert_eq;

#[test]
fn collections_survive_reopening_the_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("hub.db");

    let (log_id, apt_id) = {
        let hub = Hub::open(&path).unwrap();
        let mut logs = hub.logs().unwrap();
        let at = NaiveTime::from_hms_opt(12, 5, 0).unwrap();
        let entry = tracker::quick_log(&mut logs, LogType::Poop, None, None, at).unwrap();

        let mut apartments = hub.apartments().unwrap();
        let draft = ApartmentDraft {
            title: "Oak Ave".to_string(),
            price: "1800".to_string(),
            specs: "Studio".to_string(),
            ..Default::default()
        };
        let apt = tracker::publish_apartment(&mut apartments, draft, 1_714_000_000_000).unwrap();
        (entry.id, apt.id)
    };

    let hub = Hub::open(&path).unwrap();
    let logs = hub.logs().unwrap();
    assert!(!logs.is_seeded());
    assert_eq!(logs.get()[0].id, log_id);
    assert_eq!(logs.get()[0].time, "12:05 PM");
    assert_eq!(&logs.get()[1..], seed::daily_logs().as_slice());

    let apartments = hub.apartments().unwrap();
    assert_eq!(apartments.get()[0].id, apt_id);
    assert_eq!(apartments.get()[0].price, "$1800");
    assert!(hub.checklist().unwrap().is_seeded());
}

#[test]
fn stored_value_is_json_array_under_namespaced_key() {
    let store = SqliteStore::open_in_memory().unwrap();
    let hub = Hub::new(store);
    let mut apartments = hub.apartments().unwrap();
    let on = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    tracker::add_apartment_note(&mut apartments, "1", "Big yard", on).unwrap();

    let raw = hub.store().read("goldie_hub_apartments").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["title"], "The Lofts at River");
    assert_eq!(first["description"], "[NOTE]: Big yard (6/1/2024)");
    assert_eq!(first["petTag"], "Large Dog OK");
    assert_eq!(hub.store().keys().unwrap(), vec!["goldie_hub_apartments".to_string()]);
}

#[test]
fn corrupt_row_falls_back_to_seed_without_error() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.write("goldie_hub_logs", "[{\"id\": 5}]").unwrap();

    let logs = Collection::<DailyLogEntry, _>::open(&store).unwrap();

    assert!(logs.is_seeded());
    assert_eq!(logs.get(), seed::daily_logs().as_slice());
}
