//! The fixed, ordered collection of user records shown by the browser.

use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;
use shared::{
    domain::{UserId, UserRecord},
    error::DirectoryError,
};

const SAMPLE_VIDEO_URL: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

#[derive(Debug, Clone)]
pub struct Directory {
    records: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default, alias = "user")]
    users: Vec<UserRecord>,
}

impl Directory {
    /// Builds a directory, rejecting duplicate identifiers.
    pub fn new(records: Vec<UserRecord>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(DirectoryError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn builtin() -> Self {
        let records = vec![
            builtin_record(
                "1027342647595106314",
                "drop19s",
                "/image.jpeg",
                Some(SAMPLE_VIDEO_URL),
                Some("ZMyvE0YLK5uiHXu618TMayCmCRdMg5o4XtgQ41phWD3Z6XqB"),
            ),
            builtin_record(
                "1027342647595106315",
                "Jane Smith",
                "/jane-smith.jpg",
                None,
                Some("Short reason"),
            ),
            builtin_record(
                "1027342647595106316",
                "Alice Johnson",
                "/alice-johnson.jpg",
                Some(SAMPLE_VIDEO_URL),
                None,
            ),
            builtin_record(
                "1027342647595106317",
                "Christopher Fanta",
                "/christopher-fanta.jpg",
                None,
                Some("Another example of a longer reason that should wrap properly in the UI"),
            ),
            builtin_record(
                "1027342647595106318",
                "Lamar James",
                "/lamar-james.jpg",
                Some(SAMPLE_VIDEO_URL),
                None,
            ),
            builtin_record(
                "1027342647595106319",
                "Jahiem Yeager",
                "/jahiem-yeager.jpg",
                None,
                Some("Brief reason"),
            ),
        ];
        Self { records }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, DirectoryError> {
        let file: DirectoryFile = toml::from_str(raw)?;
        Self::new(file.users)
    }

    /// Accepts either a bare JSON array of records or `{ "users": [...] }`.
    pub fn from_json_str(raw: &str) -> Result<Self, DirectoryError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let records = if value.is_array() {
            serde_json::from_value::<Vec<UserRecord>>(value)?
        } else {
            serde_json::from_value::<DirectoryFile>(value)?.users
        };
        Self::new(records)
    }

    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let raw = fs::read_to_string(path).map_err(|source| DirectoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let directory = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&raw)?,
            Some("json") => Self::from_json_str(&raw)?,
            _ => return Err(DirectoryError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::info!(
            path = %path.display(),
            records = directory.len(),
            "loaded user directory"
        );
        Ok(directory)
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UserRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_record(
    id: &str,
    name: &str,
    image: &str,
    video_url: Option<&str>,
    reason: Option<&str>,
) -> UserRecord {
    UserRecord {
        id: UserId::new(id),
        name: name.to_string(),
        image: Some(image.to_string()),
        has_clip: video_url.is_some(),
        video_url: video_url.map(str::to_string),
        reason: reason.map(str::to_string),
    }
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
