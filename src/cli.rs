use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use thiserror::Error;

use crate::auth::{AuthDecision, BasicAuthGate};
use crate::collection::{Collected, CollectionError, CollectionKind};
use crate::config::Config;
use crate::hub::Hub;
use crate::insights::{SortOption, apartment_stats, smart_alerts, sorted_apartments};
use crate::models::{
    Apartment, ApartmentStatus, ChecklistItem, DailyLogEntry, GalleryPhoto, LogType, Milestone,
    MilestoneColor, MilestoneStatus,
};
use crate::store::Store;
use crate::tracker::{self, ApartmentDraft, MilestoneDraft};
use crate::utils::{self, guess_image_mime, now_millis};

#[derive(Parser)]
#[command(name = "goldie")]
#[command(about = "Goldie Hub - puppy training log and apartment-hunt tracker")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show record counts for every collection (default if no subcommand)
    Overview,
    /// List a collection
    List {
        /// apartments | logs | milestones | gallery | checklist
        collection: CollectionKind,
        /// Apartment display order: latest | oldest | price-low | price-high
        #[arg(long, default_value = "latest")]
        sort: SortOption,
        /// Print the stored JSON instead of one line per record
        #[arg(long)]
        json: bool,
    },
    /// Save a new apartment listing
    AddApartment {
        title: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        specs: String,
        /// Image URL
        #[arg(long)]
        img: Option<String>,
        #[arg(long)]
        pet_tag: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change an apartment's status
    Status {
        id: String,
        /// touring | applied | contacted | viewed
        status: ApartmentStatus,
    },
    /// Schedule a viewing (marks the apartment as Touring)
    Schedule {
        id: String,
        /// Meeting details
        #[arg(long)]
        info: Option<String>,
    },
    /// Append a note to an apartment's log
    Note { id: String, text: String },
    /// Quick-log a puppy event
    Log {
        /// meal | sleep | pee | poop
        kind: LogType,
        #[arg(long)]
        label: Option<String>,
        /// Attach a photo
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Add a training focus area
    AddMilestone {
        #[arg(long)]
        focus: Option<String>,
        /// in-progress | mastered | scheduled
        #[arg(long)]
        status: Option<MilestoneStatus>,
        #[arg(long)]
        progress: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// blue | purple | orange | green
        #[arg(long)]
        color: Option<MilestoneColor>,
        /// What to work on next
        #[arg(long)]
        what: Option<String>,
        /// How to work on it
        #[arg(long)]
        how: Option<String>,
    },
    /// Add a photo to the gallery
    AddPhoto {
        path: PathBuf,
        #[arg(long)]
        caption: Option<String>,
    },
    /// Add a checklist item
    AddChecklist { title: String, content: String },
    /// Toggle a checklist item
    Toggle { id: String },
    /// Patch a record with JSON, e.g. '{"completed": true}' (null clears optional fields)
    Update {
        collection: CollectionKind,
        id: String,
        patch: String,
    },
    /// Remove a record
    Remove { collection: CollectionKind, id: String },
    /// Apartment hunt counters
    Stats,
    /// Feeding and potty reminders
    Insights {
        /// Hour of day (0-23); defaults to now
        #[arg(long)]
        hour: Option<u32>,
        /// Alert ids to skip (potty_alert, lunch_alert, dinner_alert)
        #[arg(long)]
        dismiss: Vec<String>,
    },
    /// Evaluate the Basic-Auth gate for a request
    AuthCheck {
        #[arg(long, default_value = "/")]
        path: String,
        /// Raw Authorization header value
        #[arg(long)]
        header: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Collection error: {0}")]
    CollectionError(#[from] CollectionError),
    #[error("Invalid patch: {0}")]
    PatchError(#[from] serde_json::Error),
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("No record with id {0}")]
    NotFound(String),
}

/// One-line rendering used by `list`.
trait ListLine {
    fn list_line(&self) -> String;
}

impl ListLine for Apartment {
    fn list_line(&self) -> String {
        format!(
            "{}  {}  {}  [{}]  {}  {}",
            self.id, self.title, self.price, self.status, self.specs, self.pet_tag
        )
    }
}

impl ListLine for DailyLogEntry {
    fn list_line(&self) -> String {
        let mut line = format!("{}  {}  {:<5}  {}", self.id, self.time, self.kind, self.label);
        if let Some(detail) = &self.detail {
            line.push(' ');
            line.push_str(detail);
        }
        if self.image.is_some() {
            line.push_str("  (photo)");
        }
        line
    }
}

impl ListLine for Milestone {
    fn list_line(&self) -> String {
        format!(
            "{}  {}  [{}]  {}",
            self.id, self.focus_area, self.status, self.recent_progress
        )
    }
}

impl ListLine for GalleryPhoto {
    fn list_line(&self) -> String {
        format!(
            "{}  {}  {}  ({} bytes)",
            self.id,
            self.timestamp,
            self.caption.as_deref().unwrap_or("-"),
            self.url.len()
        )
    }
}

impl ListLine for ChecklistItem {
    fn list_line(&self) -> String {
        let mark = if self.completed { "x" } else { " " };
        format!("[{}] {}  {}: {}", mark, self.id, self.title, self.content)
    }
}

fn print_records<'a, R, I>(records: I, json: bool) -> Result<(), CliError>
where
    R: ListLine + serde::Serialize + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let records: Vec<&R> = records.into_iter().collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("(empty)");
    } else {
        for record in records {
            println!("{}", record.list_line());
        }
    }
    Ok(())
}

fn list_collection<R, S>(hub: &Hub<S>, json: bool) -> Result<(), CliError>
where
    R: Collected + ListLine,
    S: Store,
{
    let collection = hub.collection::<R>()?;
    print_records(collection.get(), json)
}

/// Handle the overview command
pub fn handle_overview<S: Store>(hub: &Hub<S>) -> Result<(), CliError> {
    println!("apartments  {}", hub.apartments()?.get().len());
    println!("logs        {}", hub.logs()?.get().len());
    println!("milestones  {}", hub.milestones()?.get().len());
    println!("gallery     {}", hub.gallery()?.get().len());
    let checklist = hub.checklist()?;
    let done = checklist.get().iter().filter(|i| i.completed).count();
    println!("checklist   {}/{} done", done, checklist.get().len());
    Ok(())
}

/// Handle the list command
pub fn handle_list<S: Store>(
    hub: &Hub<S>,
    collection: CollectionKind,
    sort: SortOption,
    json: bool,
) -> Result<(), CliError> {
    match collection {
        CollectionKind::Apartments => {
            let apartments = hub.apartments()?;
            print_records(sorted_apartments(apartments.get(), sort), json)
        }
        CollectionKind::Logs => list_collection::<DailyLogEntry, S>(hub, json),
        CollectionKind::Milestones => list_collection::<Milestone, S>(hub, json),
        CollectionKind::Gallery => list_collection::<GalleryPhoto, S>(hub, json),
        CollectionKind::Checklist => list_collection::<ChecklistItem, S>(hub, json),
    }
}

/// Handle the add-apartment command
pub fn handle_add_apartment<S: Store>(hub: &Hub<S>, draft: ApartmentDraft) -> Result<(), CliError> {
    let mut apartments = hub.apartments()?;
    let apartment = tracker::publish_apartment(&mut apartments, draft, now_millis())?;
    println!("Apartment saved (ID: {})", apartment.id);
    Ok(())
}

/// Handle the status command
pub fn handle_status<S: Store>(
    hub: &Hub<S>,
    id: String,
    status: ApartmentStatus,
) -> Result<(), CliError> {
    let mut apartments = hub.apartments()?;
    let apartment = tracker::set_apartment_status(&mut apartments, &id, status)?
        .ok_or(CliError::NotFound(id))?;
    println!("{} is now {}", apartment.title, apartment.status);
    Ok(())
}

/// Handle the schedule command
pub fn handle_schedule<S: Store>(
    hub: &Hub<S>,
    id: String,
    info: Option<String>,
) -> Result<(), CliError> {
    let mut apartments = hub.apartments()?;
    let today = utils::local_now().date_naive();
    let apartment = tracker::schedule_viewing(&mut apartments, &id, info.as_deref(), today)?
        .ok_or(CliError::NotFound(id))?;
    println!("Viewing scheduled for {}", apartment.title);
    Ok(())
}

/// Handle the note command
pub fn handle_note<S: Store>(hub: &Hub<S>, id: String, text: String) -> Result<(), CliError> {
    let mut apartments = hub.apartments()?;
    if apartments.find(&id).is_none() {
        return Err(CliError::NotFound(id));
    }
    let today = utils::local_now().date_naive();
    match tracker::add_apartment_note(&mut apartments, &id, &text, today)? {
        Some(apartment) => println!("Note added to {}", apartment.title),
        None => println!("Empty note ignored"),
    }
    Ok(())
}

/// Handle the log command
pub fn handle_log<S: Store>(
    hub: &Hub<S>,
    kind: LogType,
    label: Option<String>,
    photo: Option<PathBuf>,
) -> Result<(), CliError> {
    let image = match photo {
        Some(path) => {
            let bytes = std::fs::read(&path)?;
            Some(tracker::photo_data_uri(&bytes, guess_image_mime(&path)))
        }
        None => None,
    };
    let mut logs = hub.logs()?;
    let now = utils::local_now().time();
    let entry = tracker::quick_log(&mut logs, kind, label.as_deref(), image, now)?;
    println!("Logged {} at {} (ID: {})", entry.label, entry.time, entry.id);
    Ok(())
}

/// Handle the add-milestone command
pub fn handle_add_milestone<S: Store>(
    hub: &Hub<S>,
    draft: MilestoneDraft,
) -> Result<(), CliError> {
    let mut milestones = hub.milestones()?;
    let milestone = tracker::create_milestone(&mut milestones, draft)?;
    println!("Focus area added: {} (ID: {})", milestone.focus_area, milestone.id);
    Ok(())
}

/// Handle the add-photo command
pub fn handle_add_photo<S: Store>(
    hub: &Hub<S>,
    path: PathBuf,
    caption: Option<String>,
) -> Result<(), CliError> {
    let bytes = std::fs::read(&path)?;
    let mut gallery = hub.gallery()?;
    let photo = tracker::upload_photo(
        &mut gallery,
        &bytes,
        guess_image_mime(&path),
        caption,
        now_millis(),
    )?;
    println!("Photo added (ID: {})", photo.id);
    Ok(())
}

/// Handle the add-checklist command
pub fn handle_add_checklist<S: Store>(
    hub: &Hub<S>,
    title: String,
    content: String,
) -> Result<(), CliError> {
    let mut checklist = hub.checklist()?;
    let item = tracker::add_checklist_item(&mut checklist, title, content)?;
    println!("Checklist item added (ID: {})", item.id);
    Ok(())
}

/// Handle the toggle command
pub fn handle_toggle<S: Store>(hub: &Hub<S>, id: String) -> Result<(), CliError> {
    let mut checklist = hub.checklist()?;
    let item = tracker::toggle_checklist_item(&mut checklist, &id)?.ok_or(CliError::NotFound(id))?;
    let state = if item.completed { "done" } else { "not done" };
    println!("{} marked {}", item.title, state);
    Ok(())
}

fn update_record<R, S>(hub: &Hub<S>, id: &str, patch: &str) -> Result<bool, CliError>
where
    R: Collected,
    R::Patch: DeserializeOwned,
    S: Store,
{
    let patch: R::Patch = serde_json::from_str(patch)?;
    let mut collection = hub.collection::<R>()?;
    let found = collection.find(id).is_some();
    collection.update(id, &patch)?;
    Ok(found)
}

fn remove_record<R: Collected, S: Store>(hub: &Hub<S>, id: &str) -> Result<bool, CliError> {
    let mut collection = hub.collection::<R>()?;
    let before = collection.get().len();
    let after = collection.remove(id)?.len();
    Ok(after < before)
}

/// Handle the update command. Unknown ids are reported but not an error.
pub fn handle_update<S: Store>(
    hub: &Hub<S>,
    collection: CollectionKind,
    id: String,
    patch: String,
) -> Result<(), CliError> {
    let found = match collection {
        CollectionKind::Apartments => update_record::<Apartment, S>(hub, &id, &patch)?,
        CollectionKind::Logs => update_record::<DailyLogEntry, S>(hub, &id, &patch)?,
        CollectionKind::Milestones => update_record::<Milestone, S>(hub, &id, &patch)?,
        CollectionKind::Gallery => update_record::<GalleryPhoto, S>(hub, &id, &patch)?,
        CollectionKind::Checklist => update_record::<ChecklistItem, S>(hub, &id, &patch)?,
    };
    if found {
        println!("Updated {} in {}", id, collection);
    } else {
        println!("No record {} in {}; nothing changed", id, collection);
    }
    Ok(())
}

/// Handle the remove command. Unknown ids are reported but not an error.
pub fn handle_remove<S: Store>(
    hub: &Hub<S>,
    collection: CollectionKind,
    id: String,
) -> Result<(), CliError> {
    let removed = match collection {
        CollectionKind::Apartments => remove_record::<Apartment, S>(hub, &id)?,
        CollectionKind::Logs => remove_record::<DailyLogEntry, S>(hub, &id)?,
        CollectionKind::Milestones => remove_record::<Milestone, S>(hub, &id)?,
        CollectionKind::Gallery => remove_record::<GalleryPhoto, S>(hub, &id)?,
        CollectionKind::Checklist => remove_record::<ChecklistItem, S>(hub, &id)?,
    };
    if removed {
        println!("Removed {} from {}", id, collection);
    } else {
        println!("No record {} in {}; nothing changed", id, collection);
    }
    Ok(())
}

/// Handle the stats command
pub fn handle_stats<S: Store>(hub: &Hub<S>) -> Result<(), CliError> {
    let apartments = hub.apartments()?;
    let stats = apartment_stats(apartments.get());
    println!("Saved    {}", stats.saved);
    println!("Toured   {}", stats.toured);
    println!("Applied  {}", stats.applied);
    Ok(())
}

/// Handle the insights command
pub fn handle_insights<S: Store>(
    hub: &Hub<S>,
    config: &Config,
    hour: Option<u32>,
    dismiss: Vec<String>,
) -> Result<(), CliError> {
    use chrono::Timelike;

    let hour = hour.unwrap_or_else(|| utils::local_now().hour());
    let logs = hub.logs()?;
    let alerts = smart_alerts(logs.get(), hour, &dismiss, &config.puppy_name);
    if alerts.is_empty() {
        println!("All caught up");
    }
    for alert in alerts {
        println!("[{}] {}: {}", alert.kind, alert.message, alert.detail);
        println!("    -> {} ({})", alert.action, alert.action_type);
    }
    Ok(())
}

/// Handle the auth-check command
pub fn handle_auth_check(gate: &BasicAuthGate, path: &str, header: Option<&str>) {
    match gate.check_request(path, header) {
        AuthDecision::Pass => println!("pass"),
        AuthDecision::Challenge(challenge) => {
            println!("{}", challenge.status);
            println!("WWW-Authenticate: {}", challenge.www_authenticate);
            println!("{}", challenge.body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn json_patch_edits_milestone_and_clears_optional_field() {
        let hub = Hub::new(MemoryStore::new());
        let patch = r#"{"whatToWorkOn":"Ring the bell"}"#;
        assert!(update_record::<Milestone, _>(&hub, "1", patch).unwrap());

        let patch = r#"{"status":"Mastered","whatToWorkOn":null}"#;
        assert!(update_record::<Milestone, _>(&hub, "1", patch).unwrap());

        let milestones = hub.milestones().unwrap();
        let edited = milestones.find("1").unwrap();
        assert_eq!(edited.status, MilestoneStatus::Mastered);
        assert_eq!(edited.what_to_work_on, None);
        assert_eq!(edited.focus_area, "Potty Training");
        assert_eq!(edited.recent_progress, "No accidents for 2 days");
    }

    #[test]
    fn json_patch_with_unknown_field_is_rejected_before_writing() {
        let hub = Hub::new(MemoryStore::new());

        let err = update_record::<Milestone, _>(&hub, "1", r#"{"colour":"green"}"#).unwrap_err();
        assert!(matches!(err, CliError::PatchError(_)));

        let err = update_record::<Milestone, _>(&hub, "1", r#"{"id":"99"}"#).unwrap_err();
        assert!(matches!(err, CliError::PatchError(_)));

        assert!(hub.milestones().unwrap().is_seeded());
    }

    #[test]
    fn unknown_id_is_reported_not_found_without_error() {
        let hub = Hub::new(MemoryStore::new());

        let found = update_record::<Milestone, _>(&hub, "nope", r#"{"icon":"star"}"#).unwrap();
        assert!(!found);
        assert_eq!(hub.milestones().unwrap().get(), &crate::seed::milestones()[..]);

        assert!(!remove_record::<Milestone, _>(&hub, "nope").unwrap());
        assert!(remove_record::<Milestone, _>(&hub, "2").unwrap());
        assert_eq!(hub.milestones().unwrap().get().len(), 2);
    }
}
