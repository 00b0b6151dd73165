//! Embedded server helper for running the API inside another process.

use crate::{resolve_bind_address, serve_router, AppError, AppState};
use std::{
    net::SocketAddr,
    sync::mpsc,
    thread::{self, JoinHandle},
};
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Handle to an embedded API server running on a background thread.
///
/// Dropping the handle shuts the server down and joins its thread.
pub struct EmbeddedServer {
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
    addr: SocketAddr,
    used_fallback: bool,
    state: AppState,
}

impl EmbeddedServer {
    /// Start the API server on a background thread.
    ///
    /// The server binds to `BIND` or `127.0.0.1:PORT` from the config. If the
    /// requested address is in use, it falls back to an auto-assigned port.
    ///
    /// # Errors
    /// Returns an error if the runtime or server socket cannot be created.
    pub fn start(state: AppState, allow_public: bool) -> Result<Self, AppError> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let server_state = state.clone();

        let thread = thread::Builder::new()
            .name("staffdesk-embedded-server".into())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(2)
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(err) => {
                        let _ = ready_tx.send(Err(format!("failed to start runtime: {}", err)));
                        return;
                    }
                };

                let bind_addr = resolve_bind_address(&server_state.config, allow_public);
                let mut used_fallback = false;
                let listener = match rt.block_on(tokio::net::TcpListener::bind(bind_addr)) {
                    Ok(listener) => listener,
                    Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
                        warn!(
                            "API bind address {} is in use; falling back to an auto port",
                            bind_addr
                        );
                        used_fallback = true;
                        let fallback_addr = SocketAddr::new(bind_addr.ip(), 0);
                        match rt.block_on(tokio::net::TcpListener::bind(fallback_addr)) {
                            Ok(listener) => listener,
                            Err(fallback_err) => {
                                let _ = ready_tx.send(Err(format!(
                                    "failed to bind server socket: {}",
                                    fallback_err
                                )));
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        let _ =
                            ready_tx.send(Err(format!("failed to bind server socket: {}", err)));
                        return;
                    }
                };

                let actual_addr = listener.local_addr().unwrap_or(bind_addr);
                info!("mock API listening on http://{}", actual_addr);
                let _ = ready_tx.send(Ok((actual_addr, used_fallback)));

                let shutdown = async {
                    let _ = shutdown_rx.await;
                };
                if let Err(err) =
                    rt.block_on(serve_router(listener, server_state, allow_public, shutdown))
                {
                    warn!("server error: {}", err);
                }
            })
            .map_err(|err| AppError::Server(format!("failed to spawn server: {}", err)))?;

        let mut thread_handle = Some(thread);
        let stop = |thread_handle: &mut Option<JoinHandle<()>>, tx: oneshot::Sender<()>| {
            let _ = tx.send(());
            if let Some(handle) = thread_handle.take() {
                let _ = handle.join();
            }
        };

        match ready_rx.recv() {
            Ok(Ok((addr, used_fallback))) => Ok(Self {
                shutdown: Some(shutdown_tx),
                thread: thread_handle.take(),
                addr,
                used_fallback,
                state,
            }),
            Ok(Err(message)) => {
                stop(&mut thread_handle, shutdown_tx);
                Err(AppError::Server(message))
            }
            Err(_) => {
                stop(&mut thread_handle, shutdown_tx);
                Err(AppError::Internal)
            }
        }
    }

    /// Address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for API clients, e.g. `http://127.0.0.1:51234`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Whether the requested bind address was in use and an auto port was used.
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// State shared with the running handlers.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl Drop for EmbeddedServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EmbeddedServer;
    use crate::AppState;
    use staffdesk_core::env::{env_lock, EnvGuard};
    use staffdesk_core::Config;

    #[test]
    fn embedded_server_binds_an_auto_port_and_shares_state() {
        let _lock = env_lock().lock().expect("env lock");
        let _bind = EnvGuard::remove("BIND");
        let state = AppState::new(Config {
            port: 0,
            seed_demo_data: true,
            ..Config::default()
        });
        let server = EmbeddedServer::start(state, false).expect("start");
        assert!(server.addr().ip().is_loopback());
        assert_ne!(server.addr().port(), 0);
        assert!(server.base_url().starts_with("http://127.0.0.1:"));
        assert_eq!(server.state().repo.len().expect("len"), 3);
    }
}
