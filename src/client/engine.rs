//! Memory Engine Module
//!
//! Single-process backing engine combining byte-string records with ordered
//! lists, atomic counter increments and TTL expiration. Stands in for an
//! external key-value store behind the [`KvClient`](crate::client::KvClient)
//! trait.

use std::collections::HashMap;

use crate::client::StoredRecord;
use crate::error::{CacheError, Result};

// == Memory Engine ==
/// Backing storage for the in-memory KV client.
///
/// String records and lists share one keyspace: a key holds either a byte
/// record or a list, never both, and operations on the wrong kind fail with
/// [`CacheError::WrongType`].
#[derive(Debug, Default)]
pub struct MemoryEngine {
    /// Byte-string records, optionally expiring
    strings: HashMap<String, StoredRecord>,
    /// Ordered lists, append-only in practice
    lists: HashMap<String, Vec<Vec<u8>>>,
}

impl MemoryEngine {
    // == Constructor ==
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a byte record under `key` with no expiry.
    ///
    /// Overwrites any existing record or list under the same key.
    pub fn set(&mut self, key: &str, value: Vec<u8>) {
        self.lists.remove(key);
        self.strings.insert(key.to_string(), StoredRecord::new(value));
    }

    // == Set With Expiry ==
    /// Stores a byte record under `key` that expires after `ttl`.
    pub fn set_ex(&mut self, key: &str, value: Vec<u8>, ttl: std::time::Duration) {
        self.lists.remove(key);
        self.strings
            .insert(key.to_string(), StoredRecord::with_ttl(value, ttl));
    }

    // == Get ==
    /// Reads the record under `key`.
    ///
    /// Returns `None` for absent keys. Expired records are removed on read
    /// and reported as absent.
    pub fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.lists.contains_key(key) {
            return Err(CacheError::WrongType(key.to_string()));
        }

        if let Some(record) = self.strings.get(key) {
            if record.is_expired() {
                self.strings.remove(key);
                return Ok(None);
            }
            Ok(Some(record.value.clone()))
        } else {
            Ok(None)
        }
    }

    // == Increment ==
    /// Atomically increments the integer record under `name` and returns the
    /// new value.
    ///
    /// An absent (or expired) record counts from zero. A record whose bytes
    /// are not a decimal integer fails with `WrongType`.
    pub fn incr(&mut self, name: &str) -> Result<i64> {
        let current = match self.get(name)? {
            Some(bytes) => std::str::from_utf8(&bytes)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| CacheError::WrongType(name.to_string()))?,
            None => 0,
        };

        let next = current + 1;
        self.set(name, next.to_string().into_bytes());
        Ok(next)
    }

    // == List Append ==
    /// Appends `item` to the tail of the list under `list`, creating the
    /// list if absent.
    pub fn rpush(&mut self, list: &str, item: Vec<u8>) -> Result<usize> {
        if self.strings.contains_key(list) {
            return Err(CacheError::WrongType(list.to_string()));
        }

        let entries = self.lists.entry(list.to_string()).or_default();
        entries.push(item);
        Ok(entries.len())
    }

    // == List Range ==
    /// Reads an inclusive range of the list under `list`.
    ///
    /// Negative indices count from the tail, so `(0, -1)` reads the whole
    /// list. An absent list reads as empty. Out-of-range bounds are clamped.
    pub fn lrange(&self, list: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        if self.strings.contains_key(list) {
            return Err(CacheError::WrongType(list.to_string()));
        }

        let entries = match self.lists.get(list) {
            Some(entries) => entries,
            None => return Ok(Vec::new()),
        };

        let len = entries.len() as i64;
        let start = if start < 0 { (start + len).max(0) } else { start };
        let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };

        if start >= len || start > stop {
            return Ok(Vec::new());
        }

        Ok(entries[start as usize..=stop as usize].to_vec())
    }

    // == Flush All ==
    /// Removes every record and list. Destructive and irreversible.
    pub fn flush_all(&mut self) {
        self.strings.clear();
        self.lists.clear();
    }

    // == Sweep Expired ==
    /// Removes all expired records from the engine.
    ///
    /// Reads already expire lazily; the sweep only reclaims memory for
    /// records nobody touches again. Returns the number of records removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .strings
            .iter()
            .filter(|(_, record)| record.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.strings.remove(&key);
        }

        count
    }

    // == Length ==
    /// Returns the current number of keys (records plus lists).
    pub fn len(&self) -> usize {
        self.strings.len() + self.lists.len()
    }

    // == Is Empty ==
    /// Returns true if the engine holds no keys.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.lists.is_empty()
    }
}
