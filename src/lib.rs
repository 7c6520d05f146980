//! # kvcache
//!
//! An in-memory key-value cache server with:
//! - A fixed 12-byte header binary protocol (magic `0xCAFE`, version 1)
//! - Sharded storage with per-shard RwLocks
//! - Live hit/miss statistics served through the protocol itself
//! - One thread per TCP connection, strict request/response cycle
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Listener (accept loop)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ one thread per connection
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Connection Handler                          │
//! │        read frame → decode → dispatch → encode → write       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │    Store    │
//!   │   (pure)    │          │ (sharded +  │
//!   └─────────────┘          │  counters)  │
//!                            └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod store;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CacheError, Result};
pub use config::Config;
pub use store::Store;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvcache
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
