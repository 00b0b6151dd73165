//! Sync worker wiring.
//!
//! The controller thread sends [`SyncCmd`] values and drains [`SyncEvent`]
//! replies; all HTTP happens on the worker thread.

mod protocol;
mod worker;

pub use protocol::{SyncCmd, SyncEvent};
pub use worker::{execute, spawn_backend, BackendHandle};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use staffdesk_core::env::{env_lock, EnvGuard};
    use staffdesk_core::{Config, EmployeeDraft, EmploymentType};
    use staffdesk_server::{AppState, EmbeddedServer};
    use std::time::Duration;

    fn start_server(seed: bool) -> EmbeddedServer {
        let _lock = env_lock().lock().expect("env lock");
        let _bind = EnvGuard::remove("BIND");
        let state = AppState::new(Config {
            port: 0,
            seed_demo_data: seed,
            ..Config::default()
        });
        EmbeddedServer::start(state, false).expect("server")
    }

    fn recv_event(rx: &crossbeam_channel::Receiver<SyncEvent>) -> SyncEvent {
        rx.recv_timeout(Duration::from_secs(5))
            .expect("expected backend event")
    }

    fn draft() -> EmployeeDraft {
        EmployeeDraft {
            name: "Dana Scully".to_string(),
            email: "dana@test.com".to_string(),
            position: "Analyst".to_string(),
            salary: 72_000.0,
            start_date: "2024-02-29".to_string(),
            employment_type: EmploymentType::PartTime,
        }
    }

    #[test]
    fn backend_fetches_seeded_employees() {
        let server = start_server(true);
        let client = ApiClient::new(&server.base_url(), Duration::from_secs(5)).expect("client");
        let backend = spawn_backend(client).expect("spawn");

        backend.cmd_tx.send(SyncCmd::FetchAll).expect("send fetch");
        match recv_event(&backend.evt_rx) {
            SyncEvent::Fetched { employees } => {
                let ids: Vec<&str> = employees.iter().map(|e| e.id.as_str()).collect();
                assert_eq!(ids, vec!["1", "2", "3"]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn backend_creates_updates_and_deletes_employee() {
        let server = start_server(false);
        let client = ApiClient::new(&server.base_url(), Duration::from_secs(5)).expect("client");
        let backend = spawn_backend(client).expect("spawn");

        backend
            .cmd_tx
            .send(SyncCmd::Create { draft: draft() })
            .expect("send create");
        let created_id = match recv_event(&backend.evt_rx) {
            SyncEvent::Created { employee } => {
                assert_eq!(employee.name, "Dana Scully");
                employee.id
            }
            other => panic!("unexpected event: {:?}", other),
        };
        assert_eq!(created_id, "1");

        let mut changed = draft();
        changed.salary = 80_000.0;
        backend
            .cmd_tx
            .send(SyncCmd::Update {
                id: created_id.clone(),
                draft: changed,
            })
            .expect("send update");
        match recv_event(&backend.evt_rx) {
            SyncEvent::Updated { employee } => assert_eq!(employee.salary, 80_000.0),
            other => panic!("unexpected event: {:?}", other),
        }

        backend
            .cmd_tx
            .send(SyncCmd::Delete {
                id: created_id.clone(),
            })
            .expect("send delete");
        match recv_event(&backend.evt_rx) {
            SyncEvent::Deleted { id } => assert_eq!(id, created_id),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn backend_reports_not_found_with_server_message() {
        let server = start_server(false);
        let client = ApiClient::new(&server.base_url(), Duration::from_secs(5)).expect("client");
        let backend = spawn_backend(client).expect("spawn");

        backend
            .cmd_tx
            .send(SyncCmd::Delete {
                id: "99".to_string(),
            })
            .expect("send delete");
        match recv_event(&backend.evt_rx) {
            SyncEvent::DeleteFailed { id, error } => {
                assert_eq!(id, "99");
                assert_eq!(error.status, Some(404));
                assert_eq!(error.message, "Employee not found");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
