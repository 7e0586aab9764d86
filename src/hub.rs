use std::path::Path;

use crate::collection::{Collected, Collection, CollectionError};
use crate::models::{Apartment, ChecklistItem, DailyLogEntry, GalleryPhoto, Milestone};
use crate::store::{SqliteStore, Store, StoreError};

/// Owns the store for the life of the process and hands out accessors bound
/// to it.
pub struct Hub<S: Store> {
    store: S,
}

impl Hub<SqliteStore> {
    /// Open the hub against a store file, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::new(SqliteStore::new(path)?))
    }
}

impl<S: Store> Hub<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collection<R: Collected>(&self) -> Result<Collection<'_, R, S>, CollectionError> {
        Collection::open(&self.store)
    }

    pub fn apartments(&self) -> Result<Collection<'_, Apartment, S>, CollectionError> {
        self.collection()
    }

    pub fn logs(&self) -> Result<Collection<'_, DailyLogEntry, S>, CollectionError> {
        self.collection()
    }

    pub fn milestones(&self) -> Result<Collection<'_, Milestone, S>, CollectionError> {
        self.collection()
    }

    pub fn gallery(&self) -> Result<Collection<'_, GalleryPhoto, S>, CollectionError> {
        self.collection()
    }

    pub fn checklist(&self) -> Result<Collection<'_, ChecklistItem, S>, CollectionError> {
        self.collection()
    }
}
