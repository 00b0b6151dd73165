//! Background worker thread for API access.

use crate::api::ApiClient;
use crate::backend::{SyncCmd, SyncEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread;
use std::time::Instant;
use tracing::{debug, warn};

/// Handle for sending commands to, and receiving events from, the sync worker.
///
/// Dropping the handle closes the command channel, which ends the worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<SyncCmd>,
    pub evt_rx: Receiver<SyncEvent>,
}

impl BackendHandle {
    /// Wrap channels driven by a test instead of a worker thread.
    pub fn from_test_channels(cmd_tx: Sender<SyncCmd>, evt_rx: Receiver<SyncEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

/// Execute one command against the API and describe the outcome.
pub fn execute(client: &ApiClient, cmd: SyncCmd) -> SyncEvent {
    match cmd {
        SyncCmd::FetchAll => match client.fetch_employees() {
            Ok(employees) => SyncEvent::Fetched { employees },
            Err(error) => SyncEvent::FetchFailed { error },
        },
        SyncCmd::Create { draft } => match client.create_employee(&draft) {
            Ok(employee) => SyncEvent::Created { employee },
            Err(error) => SyncEvent::CreateFailed { error },
        },
        SyncCmd::Update { id, draft } => match client.update_employee(&id, &draft) {
            Ok(employee) => SyncEvent::Updated { employee },
            Err(error) => SyncEvent::UpdateFailed { id, error },
        },
        SyncCmd::Delete { id } => match client.delete_employee(&id) {
            Ok(()) => SyncEvent::Deleted { id },
            Err(error) => SyncEvent::DeleteFailed { id, error },
        },
    }
}

fn failure(event: &SyncEvent) -> Option<&crate::api::ApiError> {
    match event {
        SyncEvent::FetchFailed { error }
        | SyncEvent::CreateFailed { error }
        | SyncEvent::UpdateFailed { error, .. }
        | SyncEvent::DeleteFailed { error, .. } => Some(error),
        _ => None,
    }
}

/// Spawn the worker thread that performs blocking HTTP calls.
///
/// Commands run one at a time in arrival order; each produces exactly one
/// [`SyncEvent`].
///
/// # Errors
/// Returns an error if the worker thread cannot be spawned.
pub fn spawn_backend(client: ApiClient) -> std::io::Result<BackendHandle> {
    let (cmd_tx, cmd_rx) = unbounded::<SyncCmd>();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("staffdesk-sync".to_string())
        .spawn(move || {
            for cmd in cmd_rx.iter() {
                let op = cmd.op();
                let started = Instant::now();
                let event = execute(&client, cmd);
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                match failure(&event) {
                    Some(error) => warn!(
                        op = op,
                        status = ?error.status,
                        elapsed_ms = elapsed_ms,
                        "sync request failed: {}",
                        error
                    ),
                    None => debug!(op = op, elapsed_ms = elapsed_ms, "sync request done"),
                }
                if evt_tx.send(event).is_err() {
                    break;
                }
            }
            debug!("sync worker stopped");
        })?;

    Ok(BackendHandle { cmd_tx, evt_rx })
}
