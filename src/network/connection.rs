//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::error::{CacheError, Result};
use crate::protocol::{read_message, write_message, CommandType, Message};
use crate::store::Store;

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Store shared by every connection
    store: Arc<Store>,

    /// Largest accepted frame body
    max_frame_size: u64,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O on two handles to the same socket
    pub fn new(stream: TcpStream, store: Arc<Store>, max_frame_size: u64) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            store,
            max_frame_size,
            peer_addr,
        })
    }

    /// Configure connection timeouts (0 = none)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// One request, one response, repeat. Returns `Ok(())` when the peer
    /// goes away or idles out, and `Err` on a framing error, in which case
    /// nothing is written back and the socket is dropped.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            let request = match read_message(&mut self.reader, self.max_frame_size) {
                Ok(Some(message)) => message,
                Ok(None) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(CacheError::Io(ref e)) if is_disconnect(e.kind()) => {
                    tracing::debug!("Client {} went away: {}", self.peer_addr, e);
                    return Ok(());
                }
                Err(CacheError::Io(ref e))
                    if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
                {
                    // WouldBlock on Unix, TimedOut on Windows
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e) if e.is_framing() => {
                    tracing::warn!("Closing {} after framing error: {}", self.peer_addr, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e);
                }
            };

            tracing::trace!(
                "Received {} from {} (key {} bytes, value {} bytes)",
                request.command.name(),
                self.peer_addr,
                request.key.len(),
                request.value.len()
            );

            let response = dispatch(&self.store, request);

            if let Err(e) = write_message(&mut self.writer, &response) {
                if let CacheError::Io(ref io_err) = e {
                    if is_disconnect(io_err.kind()) {
                        tracing::debug!(
                            "Client {} disconnected before response could be sent: {}",
                            self.peer_addr,
                            e
                        );
                        return Ok(());
                    }
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe
    )
}

/// Execute one request against the store and build its response
///
/// The response always echoes the request command. GET misses come back
/// with an empty value; STATS ignores the request key and value.
pub fn dispatch(store: &Store, request: Message) -> Message {
    match request.command {
        CommandType::Set => {
            store.set(request.key.clone(), request.value.clone());
            Message::set(request.key, request.value)
        }
        CommandType::Get => {
            let value = store.get(&request.key).unwrap_or_default();
            Message::new(CommandType::Get, request.key, value)
        }
        CommandType::Del => {
            let outcome = store.delete(&request.key);
            tracing::trace!("DEL outcome: {:?}", outcome);
            Message::delete(request.key)
        }
        CommandType::Stats => {
            let stats = store.stats();
            Message::new(CommandType::Stats, Bytes::new(), stats.to_string())
        }
    }
}
