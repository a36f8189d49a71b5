use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    DiscordId,
    Reason,
}

impl RequiredField {
    pub fn label(self) -> &'static str {
        match self {
            Self::DiscordId => "Discord ID",
            Self::Reason => "Reason",
        }
    }
}

pub const FIELD_REQUIRED_MESSAGE: &str = "This field is required.";

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("duplicate user id {0} in directory")]
    DuplicateId(UserId),
    #[error("failed to read directory file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML directory: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON directory: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported directory file extension for {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required field missing: {}", missing_labels(.missing))]
pub struct IntakeValidationError {
    pub missing: Vec<RequiredField>,
}

impl IntakeValidationError {
    pub fn is_missing(&self, field: RequiredField) -> bool {
        self.missing.contains(&field)
    }
}

fn missing_labels(missing: &[RequiredField]) -> String {
    missing
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_every_missing_field() {
        let err = IntakeValidationError {
            missing: vec![RequiredField::DiscordId, RequiredField::Reason],
        };
        assert_eq!(err.to_string(), "required field missing: Discord ID, Reason");
        assert!(err.is_missing(RequiredField::Reason));
    }
}
