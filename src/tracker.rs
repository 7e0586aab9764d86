//! Tracker actions built on the collection accessors.
//!
//! These are the writes the front end performs: each one builds or patches a
//! record and goes through `add`/`update` so the collection contract holds.
//! Clock values are passed in by the caller.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::{NaiveDate, NaiveTime};

use crate::collection::{Collection, CollectionError, new_id};
use crate::models::{
    Apartment, ApartmentPatch, ApartmentStatus, ChecklistItem, ChecklistPatch, DailyLogEntry,
    FieldPatch, GalleryPhoto, LogType, Milestone, MilestoneColor, MilestoneStatus,
};
use crate::store::Store;
use crate::utils::{display_date, display_time};

pub const DEFAULT_APARTMENT_IMG: &str =
    "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?auto=format&fit=crop&q=80&w=800";
pub const DEFAULT_PET_TAG: &str = "Golden Friendly";
pub const DEFAULT_MEETING_INFO: &str = "Meeting scheduled via hub.";
pub const POTTY_DETAIL: &str = "- Backyard";

/// Form input for a new apartment listing.
#[derive(Debug, Clone, Default)]
pub struct ApartmentDraft {
    pub title: String,
    pub price: String,
    pub specs: String,
    pub img: Option<String>,
    pub pet_tag: Option<String>,
    pub description: Option<String>,
}

/// `$` followed by the input with its first `$` removed.
pub fn normalize_price(input: &str) -> String {
    format!("${}", input.replacen('$', "", 1))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Appends a line to an apartment's description log.
fn append_description(existing: Option<&str>, entry: &str) -> String {
    format!("{}\n\n{}", existing.unwrap_or(""), entry)
        .trim()
        .to_string()
}

fn status_patch(status: ApartmentStatus) -> ApartmentPatch {
    let (icon, color) = status.metadata();
    ApartmentPatch {
        status: Some(status),
        status_icon: Some(icon.to_string()),
        status_color: Some(color.to_string()),
        ..Default::default()
    }
}

/// New listings start as Viewed.
pub fn publish_apartment<S: Store + ?Sized>(
    apartments: &mut Collection<'_, Apartment, S>,
    draft: ApartmentDraft,
    created_at: i64,
) -> Result<Apartment, CollectionError> {
    let status = ApartmentStatus::Viewed;
    let (status_icon, status_color) = status.metadata();
    let apartment = Apartment {
        id: new_id(),
        title: draft.title,
        price: normalize_price(&draft.price),
        specs: draft.specs,
        img: non_empty(draft.img).unwrap_or_else(|| DEFAULT_APARTMENT_IMG.to_string()),
        status,
        status_icon: status_icon.to_string(),
        status_color: status_color.to_string(),
        pet_tag: non_empty(draft.pet_tag).unwrap_or_else(|| DEFAULT_PET_TAG.to_string()),
        pet_icon: "pets".to_string(),
        created_at,
        description: non_empty(draft.description),
    };
    apartments.add(apartment.clone())?;
    Ok(apartment)
}

/// Move a listing to `status`, keeping its icon and color in step.
pub fn set_apartment_status<S: Store + ?Sized>(
    apartments: &mut Collection<'_, Apartment, S>,
    id: &str,
    status: ApartmentStatus,
) -> Result<Option<Apartment>, CollectionError> {
    if apartments.find(id).is_none() {
        return Ok(None);
    }
    apartments.update(id, &status_patch(status))?;
    Ok(apartments.find(id).cloned())
}

/// Marks the listing as Touring and records the meeting in its description.
pub fn schedule_viewing<S: Store + ?Sized>(
    apartments: &mut Collection<'_, Apartment, S>,
    id: &str,
    info: Option<&str>,
    on: NaiveDate,
) -> Result<Option<Apartment>, CollectionError> {
    let Some(current) = apartments.find(id) else {
        return Ok(None);
    };
    let info = info
        .filter(|i| !i.is_empty())
        .unwrap_or(DEFAULT_MEETING_INFO);
    let entry = format!("[SCHEDULED]: {} ({})", info, display_date(on));
    let mut patch = status_patch(ApartmentStatus::Touring);
    patch.description = FieldPatch::Set(append_description(current.description.as_deref(), &entry));

    apartments.update(id, &patch)?;
    Ok(apartments.find(id).cloned())
}

/// Blank notes are ignored and nothing is written.
pub fn add_apartment_note<S: Store + ?Sized>(
    apartments: &mut Collection<'_, Apartment, S>,
    id: &str,
    note: &str,
    on: NaiveDate,
) -> Result<Option<Apartment>, CollectionError> {
    let note = note.trim();
    if note.is_empty() {
        return Ok(None);
    }
    let Some(current) = apartments.find(id) else {
        return Ok(None);
    };
    let entry = format!("[NOTE]: {} ({})", note, display_date(on));
    let patch = ApartmentPatch {
        description: FieldPatch::Set(append_description(current.description.as_deref(), &entry)),
        ..Default::default()
    };

    apartments.update(id, &patch)?;
    Ok(apartments.find(id).cloned())
}

/// One-tap log entry. Potty entries get the default location detail.
pub fn quick_log<S: Store + ?Sized>(
    logs: &mut Collection<'_, DailyLogEntry, S>,
    kind: LogType,
    label: Option<&str>,
    image: Option<String>,
    at: NaiveTime,
) -> Result<DailyLogEntry, CollectionError> {
    let label = match (label, &image) {
        (Some(label), _) if !label.trim().is_empty() => label.to_string(),
        (_, Some(_)) => format!("Logged {} with Photo", kind),
        _ => kind.to_string(),
    };
    let entry = DailyLogEntry {
        id: new_id(),
        time: display_time(at),
        label,
        kind,
        detail: kind.is_potty().then(|| POTTY_DETAIL.to_string()),
        image: non_empty(image),
    };
    logs.add(entry.clone())?;
    Ok(entry)
}

/// Form input for a new focus area. Blank fields take the defaults.
#[derive(Debug, Clone, Default)]
pub struct MilestoneDraft {
    pub focus_area: Option<String>,
    pub status: Option<MilestoneStatus>,
    pub recent_progress: Option<String>,
    pub icon: Option<String>,
    pub color: Option<MilestoneColor>,
    pub what_to_work_on: Option<String>,
    pub how_to_work_on: Option<String>,
}

pub fn create_milestone<S: Store + ?Sized>(
    milestones: &mut Collection<'_, Milestone, S>,
    draft: MilestoneDraft,
) -> Result<Milestone, CollectionError> {
    let milestone = Milestone {
        id: new_id(),
        focus_area: non_empty(draft.focus_area).unwrap_or_else(|| "New Focus".to_string()),
        status: draft.status.unwrap_or(MilestoneStatus::InProgress),
        recent_progress: non_empty(draft.recent_progress)
            .unwrap_or_else(|| "Just started".to_string()),
        icon: non_empty(draft.icon).unwrap_or_else(|| "school".to_string()),
        color: draft.color.unwrap_or(MilestoneColor::Blue),
        what_to_work_on: non_empty(draft.what_to_work_on),
        how_to_work_on: non_empty(draft.how_to_work_on),
    };
    milestones.add(milestone.clone())?;
    Ok(milestone)
}

pub fn photo_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, B64.encode(bytes))
}

pub fn upload_photo<S: Store + ?Sized>(
    gallery: &mut Collection<'_, GalleryPhoto, S>,
    bytes: &[u8],
    mime: &str,
    caption: Option<String>,
    timestamp: i64,
) -> Result<GalleryPhoto, CollectionError> {
    let photo = GalleryPhoto {
        id: new_id(),
        url: photo_data_uri(bytes, mime),
        timestamp,
        caption: non_empty(caption),
    };
    gallery.add(photo.clone())?;
    Ok(photo)
}

pub fn add_checklist_item<S: Store + ?Sized>(
    checklist: &mut Collection<'_, ChecklistItem, S>,
    title: String,
    content: String,
) -> Result<ChecklistItem, CollectionError> {
    let item = ChecklistItem {
        id: new_id(),
        title,
        content,
        completed: false,
    };
    checklist.add(item.clone())?;
    Ok(item)
}

/// Flip `completed`. Returns the item as stored, or `None` for an unknown id.
pub fn toggle_checklist_item<S: Store + ?Sized>(
    checklist: &mut Collection<'_, ChecklistItem, S>,
    id: &str,
) -> Result<Option<ChecklistItem>, CollectionError> {
    let Some(current) = checklist.find(id) else {
        return Ok(None);
    };
    let patch = ChecklistPatch {
        completed: Some(!current.completed),
        ..Default::default()
    };
    checklist.update(id, &patch)?;
    Ok(checklist.find(id).cloned())
}
