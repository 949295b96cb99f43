//! Startup configuration.
//!
//! Built once by the daemon from environment variables (or the matching
//! command-line flags) and passed by value into the router. Nothing here
//! changes after startup.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

pub const ENV_DATABASE: &str = "VEX_DB";
pub const ENV_EXECUTABLE: &str = "VEX_CMD";
pub const ENV_HOST: &str = "VEX_HOST";
pub const ENV_PORT: &str = "VEX_PORT";
pub const ENV_RELAY_CHUNK_SIZE: &str = "VEX_RELAY_CHUNK_SIZE";
pub const ENV_RELAY_CAPACITY: &str = "VEX_RELAY_CAPACITY";

pub const DEFAULT_DATABASE: &str = "/var/osm/db";
pub const DEFAULT_EXECUTABLE: &str = "vex";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8282;

/// Bytes read from the engine per chunk (64 KB).
pub const DEFAULT_RELAY_CHUNK_SIZE: usize = 64 * 1024;

/// Chunks that may wait in the relay channel before the reader stalls.
pub const DEFAULT_RELAY_CAPACITY: usize = 4;

/// Flow control for the stdout → response relay.
///
/// At most `chunk_size * (capacity + 1)` bytes of engine output are held
/// in memory per request: `capacity` queued chunks plus the one being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    pub chunk_size: usize,
    pub capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_RELAY_CHUNK_SIZE,
            capacity: DEFAULT_RELAY_CAPACITY,
        }
    }
}

impl RelayConfig {
    /// Upper bound on buffered, unsent engine output per request.
    pub fn max_buffered(&self) -> usize {
        self.chunk_size * (self.capacity + 1)
    }
}

#[derive(Debug, Clone)]
pub struct VexConfig {
    /// Database directory handed to the engine as its first argument.
    pub database: PathBuf,
    /// Engine executable, looked up on `PATH` when not a path.
    pub executable: PathBuf,
    pub host: String,
    pub port: u16,
    pub relay: RelayConfig,
}

impl Default for VexConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            relay: RelayConfig::default(),
        }
    }
}

impl VexConfig {
    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.as_os_str().is_empty() {
            return Err(ConfigError::Empty(ENV_DATABASE));
        }
        if self.executable.as_os_str().is_empty() {
            return Err(ConfigError::Empty(ENV_EXECUTABLE));
        }
        if self.host.is_empty() {
            return Err(ConfigError::Empty(ENV_HOST));
        }
        if self.relay.chunk_size == 0 {
            return Err(ConfigError::InvalidRelay("chunk size"));
        }
        if self.relay.capacity == 0 {
            return Err(ConfigError::InvalidRelay("capacity"));
        }
        Ok(())
    }

    /// Resolve `host:port` into the first matching socket address.
    pub fn bind_addr(&self) -> ConfigResult<SocketAddr> {
        let invalid = |reason: String| ConfigError::InvalidBindAddr {
            host: self.host.clone(),
            port: self.port,
            reason,
        };

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no addresses found".to_string()))
    }
}
