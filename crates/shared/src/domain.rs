use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Names longer than this render truncated in list rows.
pub const NAME_DISPLAY_LIMIT: usize = 20;

pub const NO_REASON_PLACEHOLDER: &str = "No reason provided";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "clip", default, with = "clip_flag")]
    pub has_clip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl UserRecord {
    /// Video reference that may be played, present only for clip records.
    pub fn playable_video(&self) -> Option<&str> {
        if !self.has_clip {
            return None;
        }
        self.video_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn reason_or_default(&self) -> &str {
        self.reason
            .as_deref()
            .filter(|reason| !reason.is_empty())
            .unwrap_or(NO_REASON_PLACEHOLDER)
    }

    pub fn truncated_name(&self) -> String {
        truncate_display_name(&self.name, NAME_DISPLAY_LIMIT)
    }

    pub fn avatar_initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

pub fn truncate_display_name(name: &str, limit: usize) -> String {
    if name.chars().count() > limit {
        let head: String = name.chars().take(limit).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

/// Accepted entry from the intake form. Nothing stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeSubmission {
    pub discord_id: String,
    pub reason: String,
    pub clip: bool,
    pub submitted_at: DateTime<Utc>,
}

/// `clip` is written as 0/1 in directory files; booleans are accepted too.
mod clip_flag {
    use serde::{de, Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(ClipFlagVisitor)
    }

    struct ClipFlagVisitor;

    impl<'de> de::Visitor<'de> for ClipFlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("0, 1, true or false")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
            }
        }
    }
}
