//! Backend-to-UI events and error modeling for the desktop GUI controller.

pub enum UiEvent {
    Info(String),
    VideoReady { session: u64 },
    VideoFailed { session: u64, reason: String },
    IntakeAccepted { discord_id: String },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Media,
    Config,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    PlayVideo,
    OpenExternal,
    SubmitIntake,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Media => "Media",
        UiErrorCategory::Config => "Configuration",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("required")
            || message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("config") || message_lower.contains("directory file") {
            UiErrorCategory::Config
        } else if message_lower.contains("video")
            || message_lower.contains("media")
            || message_lower.contains("player")
            || message_lower.contains("status")
        {
            UiErrorCategory::Media
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn banner_text(&self) -> String {
        format!("{} error: {}", err_label(self.category), self.message)
    }
}
