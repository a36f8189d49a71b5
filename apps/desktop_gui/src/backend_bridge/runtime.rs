//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread, time::Duration};

use browser_core::{media::parse_video_url, IntakeSink, MediaProbe};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, Copy)]
pub struct BackendSettings {
    pub probe_timeout: Duration,
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: BackendSettings,
    sink: Arc<dyn IntakeSink>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let probe = match MediaProbe::new(settings.probe_timeout) {
                Ok(probe) => probe,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: media client: {err}"),
                    )));
                    tracing::error!("failed to build media probe client: {err}");
                    return;
                }
            };
            tracing::info!("backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                let probe = probe.clone();
                let sink = Arc::clone(&sink);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = handle_command(cmd, &probe, sink.as_ref()).await;
                    let _ = ui_tx.try_send(event);
                });
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}

async fn probe_video(probe: &MediaProbe, session: u64, url: &str) -> UiEvent {
    match probe.probe(url).await {
        Ok(()) => UiEvent::VideoReady { session },
        Err(err) => {
            tracing::warn!(url, session, "video probe failed: {err}");
            UiEvent::VideoFailed {
                session,
                reason: err.to_string(),
            }
        }
    }
}

async fn handle_command(cmd: BackendCommand, probe: &MediaProbe, sink: &dyn IntakeSink) -> UiEvent {
    match cmd {
        BackendCommand::ProbeVideo { session, url } => probe_video(probe, session, &url).await,
        BackendCommand::OpenExternal { url } => {
            match open_in_external_player(&url, |target| open::that_detached(target)) {
                Ok(()) => UiEvent::Info("Opened video in external player".to_string()),
                Err(message) => UiEvent::Error(UiError::from_message(
                    UiErrorContext::OpenExternal,
                    message,
                )),
            }
        }
        BackendCommand::SubmitIntake { submission } => match sink.accept(&submission) {
            Ok(()) => UiEvent::IntakeAccepted {
                discord_id: submission.discord_id,
            },
            Err(err) => UiEvent::Error(UiError::from_message(
                UiErrorContext::SubmitIntake,
                err.to_string(),
            )),
        },
    }
}

/// Hands a validated http(s) reference to the system URL handler. The
/// reference is passed as one argument and never goes through a shell.
fn open_in_external_player(
    url: &str,
    launch: impl FnOnce(&str) -> std::io::Result<()>,
) -> Result<(), String> {
    let url = parse_video_url(url).map_err(|err| err.to_string())?;
    launch(url.as_str()).map_err(|err| format!("Failed to launch external video player: {err}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use browser_core::IntakeSinkError;
    use chrono::Utc;
    use shared::domain::IntakeSubmission;

    use super::*;
    use crate::controller::events::UiErrorCategory;

    #[derive(Default)]
    struct RecordingSink {
        accepted: Mutex<Vec<IntakeSubmission>>,
        fail: bool,
    }

    impl IntakeSink for RecordingSink {
        fn accept(&self, submission: &IntakeSubmission) -> Result<(), IntakeSinkError> {
            if self.fail {
                return Err(IntakeSinkError::Unavailable("offline".to_string()));
            }
            self.accepted
                .lock()
                .expect("sink lock")
                .push(submission.clone());
            Ok(())
        }
    }

    fn submission() -> IntakeSubmission {
        IntakeSubmission {
            discord_id: "1027342647595106320".to_string(),
            reason: "spam".to_string(),
            clip: false,
            submitted_at: Utc::now(),
        }
    }

    fn probe() -> MediaProbe {
        MediaProbe::new(Duration::from_secs(1)).expect("probe")
    }

    #[tokio::test]
    async fn submitted_intake_reaches_sink() {
        let sink = RecordingSink::default();
        let event = handle_command(
            BackendCommand::SubmitIntake {
                submission: submission(),
            },
            &probe(),
            &sink,
        )
        .await;
        assert!(matches!(
            event,
            UiEvent::IntakeAccepted { ref discord_id } if discord_id == "1027342647595106320"
        ));
        assert_eq!(sink.accepted.lock().expect("sink lock").len(), 1);
    }

    #[tokio::test]
    async fn sink_failure_becomes_ui_error() {
        let sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        let event = handle_command(
            BackendCommand::SubmitIntake {
                submission: submission(),
            },
            &probe(),
            &sink,
        )
        .await;
        let UiEvent::Error(err) = event else {
            panic!("expected error event");
        };
        assert_eq!(err.context(), UiErrorContext::SubmitIntake);
    }

    #[tokio::test]
    async fn external_open_rejects_bad_reference_without_spawning() {
        let event = handle_command(
            BackendCommand::OpenExternal {
                url: "file:///etc/passwd".to_string(),
            },
            &probe(),
            &RecordingSink::default(),
        )
        .await;
        let UiEvent::Error(err) = event else {
            panic!("expected error event");
        };
        assert_eq!(err.context(), UiErrorContext::OpenExternal);
        assert_eq!(err.category(), UiErrorCategory::Media);
    }

    #[tokio::test]
    async fn invalid_reference_probe_reports_video_failure() {
        let event = handle_command(
            BackendCommand::ProbeVideo {
                session: 7,
                url: "not a url".to_string(),
            },
            &probe(),
            &RecordingSink::default(),
        )
        .await;
        assert!(matches!(
            event,
            UiEvent::VideoFailed { session: 7, .. }
        ));
    }

    #[test]
    fn external_launch_receives_query_string_intact() {
        let raw = "https://videos.example/watch?a=1&calc";
        let mut launched = Vec::new();
        open_in_external_player(raw, |target| {
            launched.push(target.to_string());
            Ok(())
        })
        .expect("http reference opens");
        assert_eq!(launched, [raw]);
    }

    #[test]
    fn external_launch_skips_rejected_references() {
        let mut called = false;
        let err = open_in_external_player("file:///C:/Windows/System32/calc.exe", |_| {
            called = true;
            Ok(())
        })
        .expect_err("file scheme is rejected");
        assert!(!called);
        assert!(err.contains("file"));
    }

    #[test]
    fn external_launch_failure_is_reported() {
        let err = open_in_external_player("https://videos.example/clip", |_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no handler"))
        })
        .expect_err("launcher failed");
        assert!(err.contains("no handler"));
    }
}
