use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A record kind that lives in a collection.
///
/// Records carry no identity beyond their `id` string. Updates go through the
/// kind's typed patch, which never touches `id`.
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Patch: Clone;

    fn id(&self) -> &str;

    /// Shallow merge: fields present in the patch overwrite, absent fields keep
    /// their prior value.
    fn apply(&mut self, patch: &Self::Patch);
}

/// Presence-aware patch value for an optional record field.
///
/// In JSON a missing key is `Keep`, `null` is `Clear` and any other value is
/// `Set`. Container structs must use `#[serde(default)]` for the missing case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldPatch<T> {
    #[default]
    Keep,
    Set(T),
    Clear,
}

impl<T: Clone> FieldPatch<T> {
    pub fn apply_to(&self, target: &mut Option<T>) {
        match self {
            FieldPatch::Keep => {}
            FieldPatch::Set(value) => *target = Some(value.clone()),
            FieldPatch::Clear => *target = None,
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, FieldPatch::Keep)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldPatch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => FieldPatch::Set(value),
            None => FieldPatch::Clear,
        })
    }
}

fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Apartments

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApartmentStatus {
    Touring,
    Applied,
    Contacted,
    Viewed,
}

impl ApartmentStatus {
    /// Display metadata `(icon, color tag)` shown next to the status.
    pub fn metadata(self) -> (&'static str, &'static str) {
        match self {
            ApartmentStatus::Touring => ("directions_run", "bg-primary"),
            ApartmentStatus::Applied => ("hourglass_top", "bg-yellow-500"),
            ApartmentStatus::Contacted => ("call", "bg-gray-500"),
            ApartmentStatus::Viewed => ("visibility", "bg-blue-500"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApartmentStatus::Touring => "Touring",
            ApartmentStatus::Applied => "Applied",
            ApartmentStatus::Contacted => "Contacted",
            ApartmentStatus::Viewed => "Viewed",
        }
    }
}

impl fmt::Display for ApartmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApartmentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "touring" => Ok(ApartmentStatus::Touring),
            "applied" => Ok(ApartmentStatus::Applied),
            "contacted" => Ok(ApartmentStatus::Contacted),
            "viewed" => Ok(ApartmentStatus::Viewed),
            _ => Err(ParseEnumError::new("apartment status", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    pub id: String,
    pub title: String,
    pub price: String, // display string, e.g. "$2,400"
    pub specs: String,
    pub img: String,
    pub status: ApartmentStatus,
    pub status_icon: String,
    pub status_color: String,
    pub pet_tag: String,
    pub pet_icon: String,
    pub created_at: i64, // epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ApartmentPatch {
    pub title: Option<String>,
    pub price: Option<String>,
    pub specs: Option<String>,
    pub img: Option<String>,
    pub status: Option<ApartmentStatus>,
    pub status_icon: Option<String>,
    pub status_color: Option<String>,
    pub pet_tag: Option<String>,
    pub pet_icon: Option<String>,
    pub created_at: Option<i64>,
    pub description: FieldPatch<String>,
}

impl Record for Apartment {
    type Patch = ApartmentPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &ApartmentPatch) {
        merge(&mut self.title, &patch.title);
        merge(&mut self.price, &patch.price);
        merge(&mut self.specs, &patch.specs);
        merge(&mut self.img, &patch.img);
        merge(&mut self.status, &patch.status);
        merge(&mut self.status_icon, &patch.status_icon);
        merge(&mut self.status_color, &patch.status_color);
        merge(&mut self.pet_tag, &patch.pet_tag);
        merge(&mut self.pet_icon, &patch.pet_icon);
        merge(&mut self.created_at, &patch.created_at);
        patch.description.apply_to(&mut self.description);
    }
}

// ---------------------------------------------------------------------------
// Daily logs

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogType {
    Meal,
    Sleep,
    Pee,
    Poop,
}

impl LogType {
    pub fn as_str(self) -> &'static str {
        match self {
            LogType::Meal => "Meal",
            LogType::Sleep => "Sleep",
            LogType::Pee => "Pee",
            LogType::Poop => "Poop",
        }
    }

    pub fn is_potty(self) -> bool {
        matches!(self, LogType::Pee | LogType::Poop)
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meal" => Ok(LogType::Meal),
            "sleep" => Ok(LogType::Sleep),
            "pee" => Ok(LogType::Pee),
            "poop" => Ok(LogType::Poop),
            _ => Err(ParseEnumError::new("log type", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub id: String,
    pub time: String, // display only, e.g. "10:45 AM"
    pub label: String,
    #[serde(rename = "type")]
    pub kind: LogType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>, // data URI
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DailyLogPatch {
    pub time: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<LogType>,
    pub detail: FieldPatch<String>,
    pub image: FieldPatch<String>,
}

impl Record for DailyLogEntry {
    type Patch = DailyLogPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &DailyLogPatch) {
        merge(&mut self.time, &patch.time);
        merge(&mut self.label, &patch.label);
        merge(&mut self.kind, &patch.kind);
        patch.detail.apply_to(&mut self.detail);
        patch.image.apply_to(&mut self.image);
    }
}

// ---------------------------------------------------------------------------
// Milestones

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Mastered,
    Scheduled,
}

impl MilestoneStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MilestoneStatus::InProgress => "In Progress",
            MilestoneStatus::Mastered => "Mastered",
            MilestoneStatus::Scheduled => "Scheduled",
        }
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MilestoneStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "inprogress" => Ok(MilestoneStatus::InProgress),
            "mastered" => Ok(MilestoneStatus::Mastered),
            "scheduled" => Ok(MilestoneStatus::Scheduled),
            _ => Err(ParseEnumError::new("milestone status", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneColor {
    Blue,
    Purple,
    Orange,
    Green,
}

impl fmt::Display for MilestoneColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MilestoneColor::Blue => "blue",
            MilestoneColor::Purple => "purple",
            MilestoneColor::Orange => "orange",
            MilestoneColor::Green => "green",
        })
    }
}

impl FromStr for MilestoneColor {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(MilestoneColor::Blue),
            "purple" => Ok(MilestoneColor::Purple),
            "orange" => Ok(MilestoneColor::Orange),
            "green" => Ok(MilestoneColor::Green),
            _ => Err(ParseEnumError::new("milestone color", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub focus_area: String,
    pub status: MilestoneStatus,
    pub recent_progress: String,
    pub icon: String,
    pub color: MilestoneColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_to_work_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_work_on: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MilestonePatch {
    pub focus_area: Option<String>,
    pub status: Option<MilestoneStatus>,
    pub recent_progress: Option<String>,
    pub icon: Option<String>,
    pub color: Option<MilestoneColor>,
    pub what_to_work_on: FieldPatch<String>,
    pub how_to_work_on: FieldPatch<String>,
}

impl Record for Milestone {
    type Patch = MilestonePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &MilestonePatch) {
        merge(&mut self.focus_area, &patch.focus_area);
        merge(&mut self.status, &patch.status);
        merge(&mut self.recent_progress, &patch.recent_progress);
        merge(&mut self.icon, &patch.icon);
        merge(&mut self.color, &patch.color);
        patch.what_to_work_on.apply_to(&mut self.what_to_work_on);
        patch.how_to_work_on.apply_to(&mut self.how_to_work_on);
    }
}

// ---------------------------------------------------------------------------
// Gallery

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub id: String,
    pub url: String, // data URI
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryPhotoPatch {
    pub url: Option<String>,
    pub timestamp: Option<i64>,
    pub caption: FieldPatch<String>,
}

impl Record for GalleryPhoto {
    type Patch = GalleryPhotoPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &GalleryPhotoPatch) {
        merge(&mut self.url, &patch.url);
        merge(&mut self.timestamp, &patch.timestamp);
        patch.caption.apply_to(&mut self.caption);
    }
}

// ---------------------------------------------------------------------------
// Checklist

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChecklistPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub completed: Option<bool>,
}

impl Record for ChecklistItem {
    type Patch = ChecklistPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &ChecklistPatch) {
        merge(&mut self.title, &patch.title);
        merge(&mut self.content, &patch.content);
        merge(&mut self.completed, &patch.completed);
    }
}
