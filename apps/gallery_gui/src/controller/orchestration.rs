//! Command orchestration helpers from controller steps to backend command queue.

use client_core::{FetchFailure, IgnoreReason, PageEvent, Step};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Catalog worker disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

/// Carries out what the page controller asked for after a transition.
///
/// Returns the event to feed back into the controller when a fetch could not
/// be queued, so the request settles as a failure instead of loading forever.
pub fn apply_step(
    cmd_tx: &Sender<BackendCommand>,
    step: Step,
    status: &mut String,
) -> Option<PageEvent> {
    match step {
        Step::Fetch(request) => {
            *status = format!("Loading page {}", request.page);
            if dispatch_backend_command(cmd_tx, BackendCommand::FetchPage { request }, status) {
                None
            } else {
                Some(PageEvent::Resolved {
                    request: request.id,
                    outcome: Err(FetchFailure::new(status.clone())),
                })
            }
        }
        Step::Updated => None,
        Step::Ignored(IgnoreReason::StaleResponse) => {
            tracing::debug!("dropped page response superseded by a newer request");
            None
        }
        Step::Ignored(reason) => {
            tracing::debug!(?reason, "pager event ignored");
            None
        }
    }
}
