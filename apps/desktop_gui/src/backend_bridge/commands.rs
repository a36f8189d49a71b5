//! Backend commands queued from UI to backend worker.

use shared::domain::IntakeSubmission;

pub enum BackendCommand {
    ProbeVideo { session: u64, url: String },
    OpenExternal { url: String },
    SubmitIntake { submission: IntakeSubmission },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ProbeVideo { .. } => "probe_video",
            BackendCommand::OpenExternal { .. } => "open_external",
            BackendCommand::SubmitIntake { .. } => "submit_intake",
        }
    }
}
