//! Configuration for kvcache
//!
//! Centralized configuration with sensible defaults.

use std::net::ToSocketAddrs;

use crate::error::{CacheError, Result};

/// Main configuration for a kvcache server instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address (host:port)
    pub listen_addr: String,

    /// Max concurrent client connections
    pub max_connections: usize,

    /// Idle read timeout (milliseconds, 0 = wait forever)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = wait forever)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Largest accepted `key_length + value_length` in a single frame
    pub max_frame_size: u64,

    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Number of independently locked store shards
    pub num_shards: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            max_connections: 1024,
            read_timeout_ms: 30_000,
            write_timeout_ms: 5000,
            max_frame_size: 16 * 1024 * 1024, // 16 MB
            num_shards: 16,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration can actually be served
    pub fn validate(&self) -> Result<()> {
        if self.num_shards == 0 {
            return Err(CacheError::Config("num_shards must be at least 1".to_string()));
        }
        if self.max_connections == 0 {
            return Err(CacheError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.max_frame_size == 0 {
            return Err(CacheError::Config(
                "max_frame_size must be at least 1".to_string(),
            ));
        }
        let mut addrs = self.listen_addr.to_socket_addrs().map_err(|e| {
            CacheError::Config(format!("invalid listen address '{}': {}", self.listen_addr, e))
        })?;
        if addrs.next().is_none() {
            return Err(CacheError::Config(format!(
                "listen address '{}' resolved to nothing",
                self.listen_addr
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Replace only the port of the listen address
    pub fn port(mut self, port: u16) -> Self {
        let host = match self.config.listen_addr.rsplit_once(':') {
            Some((host, _)) => host.to_string(),
            None => self.config.listen_addr.clone(),
        };
        self.config.listen_addr = format!("{}:{}", host, port);
        self
    }

    /// Set the maximum number of concurrent connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the maximum frame body size (in bytes)
    pub fn max_frame_size(mut self, size: u64) -> Self {
        self.config.max_frame_size = size;
        self
    }

    /// Set the number of store shards
    pub fn num_shards(mut self, shards: usize) -> Self {
        self.config.num_shards = shards;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
