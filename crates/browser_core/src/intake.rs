//! "Add new user" intake form and the sink accepted entries are handed to.

use chrono::Utc;
use shared::{
    domain::IntakeSubmission,
    error::{IntakeValidationError, RequiredField},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub discord_id: bool,
    pub reason: bool,
}

impl FieldErrors {
    pub fn is_clear(&self) -> bool {
        !self.discord_id && !self.reason
    }

    pub fn has(&self, field: RequiredField) -> bool {
        match field {
            RequiredField::DiscordId => self.discord_id,
            RequiredField::Reason => self.reason,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    open: bool,
    pub discord_id: String,
    pub reason: String,
    pub clip: bool,
    errors: FieldErrors,
    // Fields re-validate on edit only after the first submit attempt.
    submit_attempted: bool,
}

impl IntakeForm {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Dismissing keeps whatever was typed.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn errors(&self) -> FieldErrors {
        self.errors
    }

    pub fn set_discord_id(&mut self, value: impl Into<String>) {
        self.discord_id = value.into();
        self.revalidate();
    }

    pub fn set_reason(&mut self, value: impl Into<String>) {
        self.reason = value.into();
        self.revalidate();
    }

    pub fn set_clip(&mut self, clip: bool) {
        self.clip = clip;
    }

    /// Call after editing the public fields in place.
    pub fn revalidate(&mut self) {
        if self.submit_attempted {
            self.errors = self.validate();
        }
    }

    fn validate(&self) -> FieldErrors {
        FieldErrors {
            discord_id: self.discord_id.is_empty(),
            reason: self.reason.is_empty(),
        }
    }

    /// On success the form closes and resets; on failure it stays open with
    /// the offending fields flagged.
    pub fn submit(&mut self) -> Result<IntakeSubmission, IntakeValidationError> {
        self.submit_attempted = true;
        self.errors = self.validate();
        if !self.errors.is_clear() {
            let missing = [RequiredField::DiscordId, RequiredField::Reason]
                .into_iter()
                .filter(|field| self.errors.has(*field))
                .collect();
            return Err(IntakeValidationError { missing });
        }

        let submission = IntakeSubmission {
            discord_id: std::mem::take(&mut self.discord_id),
            reason: std::mem::take(&mut self.reason),
            clip: self.clip,
            submitted_at: Utc::now(),
        };
        *self = Self::default();
        Ok(submission)
    }
}

#[derive(Debug, Error)]
pub enum IntakeSinkError {
    #[error("intake sink unavailable: {0}")]
    Unavailable(String),
}

/// Receives accepted intake entries.
pub trait IntakeSink: Send + Sync {
    fn accept(&self, submission: &IntakeSubmission) -> Result<(), IntakeSinkError>;
}

/// Logs submissions; nothing is stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingIntakeSink;

impl IntakeSink for LoggingIntakeSink {
    fn accept(&self, submission: &IntakeSubmission) -> Result<(), IntakeSinkError> {
        tracing::info!(
            discord_id = %submission.discord_id,
            reason = %submission.reason,
            clip = submission.clip,
            submitted_at = %submission.submitted_at,
            "intake submission received"
        );
        Ok(())
    }
}
