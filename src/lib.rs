pub mod auth;
pub mod cli;
pub mod collection;
pub mod config;
pub mod hub;
pub mod insights;
pub mod logging;
pub mod models;
pub mod seed;
pub mod store;
pub mod tracker;
pub mod utils;

pub use collection::{Collected, Collection, CollectionError, CollectionKind, InsertPolicy};
pub use config::Config;
pub use hub::Hub;
pub use models::{
    Apartment, ChecklistItem, DailyLogEntry, FieldPatch, GalleryPhoto, Milestone, Record,
};
pub use store::{MemoryStore, SqliteStore, Store, StoreError};
pub use utils::Profile;
