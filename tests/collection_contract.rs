use goldie_hub::collection::new_id;
use goldie_hub::models::{
    ApartmentPatch, ApartmentStatus, ChecklistPatch, FieldPatch, MilestoneColor, MilestoneStatus,
};
use goldie_hub::{Apartment, ChecklistItem, Collection, Hub, MemoryStore, Milestone, seed};
use pretty_assertions::assert_eq;

fn apartment(title: &str, price: &str, created_at: i64) -> Apartment {
    let (icon, color) = ApartmentStatus::Viewed.metadata();
    Apartment {
        id: new_id(),
        title: title.to_string(),
        price: price.to_string(),
        specs: "1 Bed".to_string(),
        img: "img".to_string(),
        status: ApartmentStatus::Viewed,
        status_icon: icon.to_string(),
        status_color: color.to_string(),
        pet_tag: "Golden Friendly".to_string(),
        pet_icon: "pets".to_string(),
        created_at,
        description: Some("first look".to_string()),
    }
}

fn milestone(id: &str) -> Milestone {
    Milestone {
        id: id.to_string(),
        focus_area: format!("Focus {id}"),
        status: MilestoneStatus::InProgress,
        recent_progress: "Just started".to_string(),
        icon: "school".to_string(),
        color: MilestoneColor::Blue,
        what_to_work_on: None,
        how_to_work_on: None,
    }
}

fn empty_apartments(store: &MemoryStore) -> Collection<'_, Apartment, MemoryStore> {
    let mut apartments = Collection::<Apartment, _>::open(store).unwrap();
    for id in seed::apartments().iter().map(|a| a.id.clone()) {
        apartments.remove(&id).unwrap();
    }
    assert!(apartments.get().is_empty());
    apartments
}

#[test]
fn add_contains_record_once_and_grows_by_one() {
    let hub = Hub::new(MemoryStore::new());
    let mut apartments = hub.apartments().unwrap();
    let before = apartments.get().len();
    let record = apartment("Elm St", "$2000", 1);

    let after = apartments.add(record.clone()).unwrap().to_vec();

    assert_eq!(after.len(), before + 1);
    assert_eq!(after.iter().filter(|a| **a == record).count(), 1);
    assert_eq!(hub.apartments().unwrap().get(), after.as_slice());
}

#[test]
fn front_insert_puts_most_recent_first() {
    let store = MemoryStore::new();
    let mut apartments = empty_apartments(&store);

    apartments.add(apartment("Elm St", "$2000", 1)).unwrap();
    apartments.add(apartment("Oak Ave", "$1800", 2)).unwrap();

    let titles: Vec<&str> = apartments.get().iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["Oak Ave", "Elm St"]);
}

#[test]
fn milestones_keep_creation_order() {
    let store = MemoryStore::new();
    let mut milestones = Collection::<Milestone, _>::open(&store).unwrap();
    let seeded = milestones.get().len();

    milestones.add(milestone("m1")).unwrap();
    milestones.add(milestone("m2")).unwrap();

    let tail: Vec<&str> = milestones.get()[seeded..]
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(tail, ["m1", "m2"]);
}

#[test]
fn remove_present_id_shrinks_by_one() {
    let store = MemoryStore::new();
    let mut milestones = Collection::<Milestone, _>::open(&store).unwrap();
    let before = milestones.get().to_vec();

    let after = milestones.remove("2").unwrap().to_vec();

    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|m| m.id != "2"));
    let expected: Vec<Milestone> = before.into_iter().filter(|m| m.id != "2").collect();
    assert_eq!(after, expected);
}

#[test]
fn remove_absent_id_leaves_sequence_unchanged() {
    let store = MemoryStore::new();
    let mut milestones = Collection::<Milestone, _>::open(&store).unwrap();
    let before = milestones.get().to_vec();

    let after = milestones.remove("missing").unwrap().to_vec();

    assert_eq!(after, before);
}

#[test]
fn update_overwrites_patched_fields_only() {
    let store = MemoryStore::new();
    let mut apartments = Collection::<Apartment, _>::open(&store).unwrap();
    let before = apartments.get().to_vec();
    let patch = ApartmentPatch {
        price: Some("$2,300".to_string()),
        description: FieldPatch::Set("Landlord called back".to_string()),
        ..Default::default()
    };

    let after = apartments.update("2", &patch).unwrap().to_vec();

    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(old.id, new.id);
        if new.id == "2" {
            let mut expected = old.clone();
            expected.price = "$2,300".to_string();
            expected.description = Some("Landlord called back".to_string());
            assert_eq!(new, &expected);
        } else {
            assert_eq!(new, old);
        }
    }
}

#[test]
fn clearing_an_optional_field_differs_from_omitting_it() {
    let store = MemoryStore::new();
    let mut apartments = empty_apartments(&store);
    let record = apartment("Elm St", "$2000", 1);
    let id = record.id.clone();
    apartments.add(record).unwrap();

    apartments.update(&id, &ApartmentPatch::default()).unwrap();
    assert_eq!(apartments.get()[0].description.as_deref(), Some("first look"));

    let clear = ApartmentPatch {
        description: FieldPatch::Clear,
        ..Default::default()
    };
    apartments.update(&id, &clear).unwrap();
    assert_eq!(apartments.get()[0].description, None);
}

#[test]
fn checklist_toggle_scenario() {
    let hub = Hub::new(MemoryStore::new());
    let mut checklist = hub.checklist().unwrap();
    let patch = ChecklistPatch {
        completed: Some(true),
        ..Default::default()
    };

    checklist.update("prep-1", &patch).unwrap();

    let reread = hub.checklist().unwrap();
    let items: Vec<ChecklistItem> = reread.get().to_vec();
    assert!(items[0].completed);
    assert_eq!(&items[1..], &seed::checklist()[1..]);
}

#[test]
fn get_is_idempotent_and_seed_is_stable_until_first_write() {
    let hub = Hub::new(MemoryStore::new());

    let first = hub.milestones().unwrap();
    assert_eq!(first.get(), first.get());
    assert_eq!(first.get(), seed::milestones().as_slice());
    assert!(first.is_seeded());

    let second = hub.milestones().unwrap();
    assert_eq!(second.get(), seed::milestones().as_slice());
    assert!(hub.gallery().unwrap().get().is_empty());
    assert_eq!(hub.logs().unwrap().get(), seed::daily_logs().as_slice());
}
