//! TCP Server
//!
//! Accepts connections and hands each one to its own thread.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::sync::WaitGroup;
use parking_lot::Mutex;

use super::Connection;
use crate::config::Config;
use crate::error::Result;
use crate::store::Store;

/// How long the accept loop sleeps when no connection is pending
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Open connections by id; each entry is a clone of the handler's socket
type Registry = Arc<Mutex<HashMap<u64, TcpStream>>>;

/// TCP server for kvcache
pub struct Server {
    config: Config,
    store: Arc<Store>,
    listener: TcpListener,
    local_addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    connections: Registry,
}

/// Cloneable handle that stops a running server
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Ask the server to stop
    ///
    /// The accept loop exits, then every open connection is shut down so
    /// handlers blocked on reads return.
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Removes a connection from the registry when its handler thread ends
struct RegistryGuard {
    id: u64,
    connections: Registry,
}

impl Drop for RegistryGuard {
    fn drop(&mut self) {
        self.connections.lock().remove(&self.id);
    }
}

impl Server {
    /// Validate the config and bind the listening socket
    pub fn bind(config: Config, store: Arc<Store>) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(&config.listen_addr)?;
        // Non-blocking accept so the loop can notice shutdown
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            config,
            store,
            listener,
            local_addr,
            shutdown: Arc::new(AtomicBool::new(false)),
            connections: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Address actually bound (useful when the port was 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }

    /// Number of connections currently being served
    pub fn active_connections(&self) -> usize {
        self.connections.lock().len()
    }

    /// Run the accept loop (blocking)
    ///
    /// Returns after shutdown once every connection thread has exited.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr);

        let wait_group = WaitGroup::new();
        let mut next_id: u64 = 0;

        while !self.shutdown.load(Ordering::Relaxed) {
            let (stream, peer) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                    continue;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    // Usually fd exhaustion; keep serving existing clients
                    tracing::error!("Accept failed: {}", e);
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                    continue;
                }
            };

            // Accepted sockets may inherit non-blocking mode on some platforms
            if let Err(e) = stream.set_nonblocking(false) {
                tracing::warn!("Failed to configure socket for {}: {}", peer, e);
                continue;
            }

            let id = next_id;
            next_id += 1;

            {
                let mut connections = self.connections.lock();
                if connections.len() >= self.config.max_connections {
                    tracing::warn!(
                        "Rejecting {}: {} connections already open",
                        peer,
                        self.config.max_connections
                    );
                    continue;
                }
                match stream.try_clone() {
                    Ok(clone) => {
                        connections.insert(id, clone);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to register {}: {}", peer, e);
                        continue;
                    }
                }
            }

            let guard = RegistryGuard {
                id,
                connections: Arc::clone(&self.connections),
            };
            let store = Arc::clone(&self.store);
            let config = self.config.clone();
            let wg = wait_group.clone();

            let spawned = thread::Builder::new()
                .name(format!("kvcache-conn-{}", peer))
                .spawn(move || {
                    let _guard = guard;
                    let _wg = wg;
                    serve(stream, store, &config);
                });
            if let Err(e) = spawned {
                tracing::error!("Failed to spawn handler for {}: {}", peer, e);
            }
        }

        self.close_connections();
        wait_group.wait();
        tracing::info!("Server on {} stopped", self.local_addr);

        Ok(())
    }

    /// Shut down every registered socket so blocked reads return EOF
    fn close_connections(&self) {
        let connections = self.connections.lock();
        tracing::info!(
            "Shutting down, closing {} open connections",
            connections.len()
        );
        for stream in connections.values() {
            // Already-closed sockets report NotConnected; nothing to do
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

/// Connection thread body; errors end only this connection
fn serve(stream: TcpStream, store: Arc<Store>, config: &Config) {
    let mut connection = match Connection::new(stream, store, config.max_frame_size) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to set up connection: {}", e);
            return;
        }
    };

    if let Err(e) = connection.set_timeouts(config.read_timeout_ms, config.write_timeout_ms) {
        tracing::warn!("Failed to set timeouts for {}: {}", connection.peer_addr(), e);
        return;
    }

    if let Err(e) = connection.handle() {
        tracing::debug!("Connection {} closed with error: {}", connection.peer_addr(), e);
    }
}
