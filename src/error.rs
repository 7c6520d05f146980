//! Error types for kvcache
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using CacheError
pub type Result<T> = std::result::Result<T, CacheError>;

/// Unified error type for kvcache operations
#[derive(Debug, Error)]
pub enum CacheError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Invalid magic: expected 0xCAFE, got 0x{found:04X}")]
    InvalidMagic { found: u16 },

    #[error("Unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    #[error("Unknown command: 0x{0:02x}")]
    UnknownCommand(u8),

    #[error("Incomplete header: expected {expected} bytes, got {got}")]
    IncompleteHeader { expected: usize, got: usize },

    #[error("Incomplete body: expected {expected} bytes, got {got}")]
    IncompleteBody { expected: usize, got: usize },

    #[error("Frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: u64, max: u64 },

    // -------------------------------------------------------------------------
    // Client Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CacheError {
    /// Whether this error means the byte stream can no longer be trusted.
    ///
    /// The server closes the connection without replying on these.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            CacheError::InvalidMagic { .. }
                | CacheError::UnsupportedVersion(_)
                | CacheError::UnknownCommand(_)
                | CacheError::IncompleteHeader { .. }
                | CacheError::IncompleteBody { .. }
                | CacheError::FrameTooLarge { .. }
        )
    }
}
