//! Stored Record Module
//!
//! Defines the structure for individual stored byte records with optional expiry.

use chrono::{DateTime, Duration, Utc};

// == Stored Record ==
/// A single byte-string record held by the memory engine.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    /// The stored bytes
    pub value: Vec<u8>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Expiration timestamp, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredRecord {
    // == Constructor ==
    /// Creates a record that never expires.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Creates a record that expires `ttl` after now.
    ///
    /// A TTL too large to represent is treated as "never expires".
    ///
    /// # Arguments
    /// * `value` - The bytes to store
    /// * `ttl` - Time-to-live for the record
    pub fn with_ttl(value: Vec<u8>, ttl: std::time::Duration) -> Self {
        let now = Utc::now();
        let expires_at = Duration::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta));
        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the record has expired.
    ///
    /// Boundary condition: a record is considered expired when the current
    /// time is greater than or equal to the expiration time, so a record is
    /// gone the instant its TTL has fully elapsed.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Utc::now() >= expires,
            None => false,
        }
    }
}
