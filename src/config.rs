//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time-to-live in seconds for cached web pages
    pub page_ttl: u64,
    /// Timeout in seconds for outbound page fetches
    pub http_timeout: u64,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PAGE_TTL` - Cached page TTL in seconds (default: 10)
    /// - `HTTP_TIMEOUT` - Page fetch timeout in seconds (default: 10)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            page_ttl: env::var("PAGE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            http_timeout: env::var("HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_ttl: 10,
            http_timeout: 10,
            sweep_interval: 1,
        }
    }
}
