use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    pub fn app_name(self) -> &'static str {
        match self {
            Profile::Dev => "goldie-hub-dev",
            Profile::Prod => "goldie-hub",
        }
    }
}

/// Get the configuration directory path
/// If profile is Dev, uses "goldie-hub-dev" instead of "goldie-hub"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "goldie-hub", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path (store file and logs live here)
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "goldie-hub", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Short display date used in apartment description entries, e.g. "4/24/2024"
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Clock time shown on log entries, e.g. "09:30 AM"
pub fn display_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

pub fn local_now() -> DateTime<Local> {
    Local::now()
}

/// Best-effort image MIME type from a file extension
pub fn guess_image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_match_tracker_layout() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 9).unwrap();
        assert_eq!(display_date(date), "4/9/2024");
        let time = NaiveTime::from_hms_opt(21, 5, 0).unwrap();
        assert_eq!(display_time(time), "09:05 PM");
    }

    #[test]
    fn expand_path_leaves_plain_paths_alone() {
        assert_eq!(expand_path("/tmp/app.db"), PathBuf::from("/tmp/app.db"));
    }

    #[test]
    fn guess_image_mime_by_extension() {
        assert_eq!(guess_image_mime(Path::new("goldie.JPG")), "image/jpeg");
        assert_eq!(guess_image_mime(Path::new("notes.txt")), "application/octet-stream");
    }
}
