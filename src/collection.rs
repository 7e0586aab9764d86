//! Per-collection accessors over a [`Store`].
//!
//! Every mutation is a read-modify-write of the whole collection: the current
//! sequence is transformed in memory, serialized to JSON and written back under
//! the collection's key. The in-memory sequence only advances once that write
//! has succeeded.

use log::debug;
use rand::Rng;
use std::fmt;
use thiserror::Error;

use crate::models::{Apartment, ChecklistItem, DailyLogEntry, GalleryPhoto, Milestone, Record};
use crate::seed;
use crate::store::{Store, StoreError};

const ID_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Failed to serialize {kind}: {source}")]
    SerializeError {
        kind: CollectionKind,
        source: serde_json::Error,
    },
}

/// The five independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Apartments,
    Logs,
    Milestones,
    Gallery,
    Checklist,
}

/// Where `add` places a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPolicy {
    /// Newest first (feeds).
    Front,
    /// Creation order (goal lists).
    Back,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 5] = [
        CollectionKind::Apartments,
        CollectionKind::Logs,
        CollectionKind::Milestones,
        CollectionKind::Gallery,
        CollectionKind::Checklist,
    ];

    pub fn storage_key(self) -> &'static str {
        match self {
            CollectionKind::Apartments => "goldie_hub_apartments",
            CollectionKind::Logs => "goldie_hub_logs",
            CollectionKind::Milestones => "goldie_hub_milestones",
            CollectionKind::Gallery => "goldie_hub_gallery",
            CollectionKind::Checklist => "goldie_hub_checklist",
        }
    }

    pub fn insert_policy(self) -> InsertPolicy {
        match self {
            CollectionKind::Apartments | CollectionKind::Logs | CollectionKind::Gallery => {
                InsertPolicy::Front
            }
            CollectionKind::Milestones | CollectionKind::Checklist => InsertPolicy::Back,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::Apartments => "apartments",
            CollectionKind::Logs => "logs",
            CollectionKind::Milestones => "milestones",
            CollectionKind::Gallery => "gallery",
            CollectionKind::Checklist => "checklist",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown collection: {}", s))
    }
}

/// Binds a record type to the collection it is stored in and that
/// collection's seed.
pub trait Collected: Record {
    const KIND: CollectionKind;

    fn seed() -> Vec<Self>;
}

impl Collected for Apartment {
    const KIND: CollectionKind = CollectionKind::Apartments;

    fn seed() -> Vec<Self> {
        seed::apartments()
    }
}

impl Collected for DailyLogEntry {
    const KIND: CollectionKind = CollectionKind::Logs;

    fn seed() -> Vec<Self> {
        seed::daily_logs()
    }
}

impl Collected for Milestone {
    const KIND: CollectionKind = CollectionKind::Milestones;

    fn seed() -> Vec<Self> {
        seed::milestones()
    }
}

impl Collected for GalleryPhoto {
    const KIND: CollectionKind = CollectionKind::Gallery;

    fn seed() -> Vec<Self> {
        seed::gallery()
    }
}

impl Collected for ChecklistItem {
    const KIND: CollectionKind = CollectionKind::Checklist;

    fn seed() -> Vec<Self> {
        seed::checklist()
    }
}

/// Random 9-character base-36 record id.
///
/// Uniqueness is not checked; collisions are negligible at tracker sizes.
pub fn new_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Accessor for one collection, borrowing the store it was opened against.
pub struct Collection<'s, R, S: Store + ?Sized> {
    store: &'s S,
    records: Vec<R>,
    seeded: bool,
}

impl<'s, R, S> Collection<'s, R, S>
where
    R: Collected,
    S: Store + ?Sized,
{
    /// Read the stored sequence, substituting the seed once if the key has
    /// never been written or holds something unparsable. Never writes.
    pub fn open(store: &'s S) -> Result<Self, CollectionError> {
        let (records, seeded) = match Self::try_read(store)? {
            Some(records) => (records, false),
            None => (R::seed(), true),
        };
        debug!(
            "event=collection_open module=collection status=ok collection={} records={} seeded={}",
            R::KIND,
            records.len(),
            seeded
        );
        Ok(Self {
            store,
            records,
            seeded,
        })
    }

    /// Explicit present/absent read of the stored sequence.
    ///
    /// A value that does not parse as a sequence of `R` counts as absent.
    pub fn try_read(store: &S) -> Result<Option<Vec<R>>, CollectionError> {
        let raw = store.read(R::KIND.storage_key())?;
        Ok(raw.and_then(|raw| serde_json::from_str(&raw).ok()))
    }

    /// The current ordered sequence.
    pub fn get(&self) -> &[R] {
        &self.records
    }

    /// Whether `get` is still serving seed data that has never been written.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Re-read from the store. Picks up writes made through other handles.
    pub fn reload(&mut self) -> Result<&[R], CollectionError> {
        *self = Self::open(self.store)?;
        Ok(&self.records)
    }

    pub fn add(&mut self, record: R) -> Result<&[R], CollectionError> {
        let mut next = self.records.clone();
        match R::KIND.insert_policy() {
            InsertPolicy::Front => next.insert(0, record),
            InsertPolicy::Back => next.push(record),
        }
        self.commit(next)
    }

    /// Merge `patch` into every record with a matching id. An unknown id
    /// leaves the sequence as it was, which is still written back.
    pub fn update(&mut self, id: &str, patch: &R::Patch) -> Result<&[R], CollectionError> {
        let next = self
            .records
            .iter()
            .cloned()
            .map(|mut record| {
                if record.id() == id {
                    record.apply(patch);
                }
                record
            })
            .collect();
        self.commit(next)
    }

    pub fn remove(&mut self, id: &str) -> Result<&[R], CollectionError> {
        let next = self
            .records
            .iter()
            .filter(|record| record.id() != id)
            .cloned()
            .collect();
        self.commit(next)
    }

    fn commit(&mut self, next: Vec<R>) -> Result<&[R], CollectionError> {
        let raw = serde_json::to_string(&next).map_err(|source| CollectionError::SerializeError {
            kind: R::KIND,
            source,
        })?;
        self.store.write(R::KIND.storage_key(), &raw)?;
        debug!(
            "event=collection_write module=collection status=ok collection={} records={}",
            R::KIND,
            next.len()
        );
        self.records = next;
        self.seeded = false;
        Ok(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChecklistPatch, MilestoneColor, MilestoneStatus};
    use crate::store::MemoryStore;

    struct ReadOnlyStore(MemoryStore);

    impl Store for ReadOnlyStore {
        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.read(key)
        }

        fn write(&self, key: &str, _raw: &str) -> Result<(), StoreError> {
            Err(StoreError::WriteError {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    fn milestone(id: &str) -> Milestone {
        Milestone {
            id: id.to_string(),
            focus_area: format!("Focus {id}"),
            status: MilestoneStatus::Scheduled,
            recent_progress: "Just started".to_string(),
            icon: "school".to_string(),
            color: MilestoneColor::Green,
            what_to_work_on: None,
            how_to_work_on: None,
        }
    }

    #[test]
    fn new_id_is_nine_base36_chars() {
        let id = new_id();
        assert_eq!(id.len(), 9);
        assert!(id.bytes().all(|b| BASE36.contains(&b)));
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn open_does_not_write_seed() {
        let store = MemoryStore::new();
        let checklist = Collection::<ChecklistItem, _>::open(&store).unwrap();
        assert!(checklist.is_seeded());
        assert_eq!(checklist.get().len(), 3);
        assert_eq!(store.read("goldie_hub_checklist").unwrap(), None);
    }

    #[test]
    fn corrupt_value_falls_back_to_seed() {
        let store = MemoryStore::new();
        store.write("goldie_hub_milestones", "{not json").unwrap();
        assert!(Collection::<Milestone, _>::try_read(&store).unwrap().is_none());

        let milestones = Collection::<Milestone, _>::open(&store).unwrap();
        assert_eq!(milestones.get(), seed::milestones().as_slice());
    }

    #[test]
    fn update_unknown_id_rewrites_unchanged_sequence() {
        let store = MemoryStore::new();
        let mut checklist = Collection::<ChecklistItem, _>::open(&store).unwrap();
        let before = checklist.get().to_vec();
        let patch = ChecklistPatch {
            completed: Some(true),
            ..Default::default()
        };

        let after = checklist.update("nope", &patch).unwrap().to_vec();

        assert_eq!(after, before);
        assert!(store.read("goldie_hub_checklist").unwrap().is_some());
        assert!(!checklist.is_seeded());
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let store = ReadOnlyStore(MemoryStore::new());
        let mut milestones = Collection::<Milestone, _>::open(&store).unwrap();
        let before = milestones.get().to_vec();

        let err = milestones.add(milestone("m1")).unwrap_err();

        assert!(matches!(
            err,
            CollectionError::StoreError(StoreError::WriteError { .. })
        ));
        assert_eq!(milestones.get(), before.as_slice());
        assert!(milestones.is_seeded());
    }

    #[test]
    fn reload_sees_writes_from_another_handle() {
        let store = MemoryStore::new();
        let mut first = Collection::<Milestone, _>::open(&store).unwrap();
        let mut second = Collection::<Milestone, _>::open(&store).unwrap();

        second.add(milestone("m9")).unwrap();
        assert!(first.find("m9").is_none());

        first.reload().unwrap();
        assert!(first.find("m9").is_some());
    }

    #[test]
    fn collection_kind_parses_names() {
        assert_eq!("Gallery".parse(), Ok(CollectionKind::Gallery));
        assert!("photos".parse::<CollectionKind>().is_err());
        assert_eq!(CollectionKind::Logs.insert_policy(), InsertPolicy::Front);
        assert_eq!(CollectionKind::Milestones.insert_policy(), InsertPolicy::Back);
    }
}
