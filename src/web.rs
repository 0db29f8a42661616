//! Read-Through Web Cache Module
//!
//! Fetches remote pages, caches their bodies in the KV store for a fixed
//! TTL, and counts every access attempt per URL regardless of cache hit or
//! miss.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::decode_text;
use crate::client::KvClient;
use crate::error::Result;

// == Defaults ==
/// Default lifetime of a cached page body.
pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(10);

/// Default timeout for outbound page fetches.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

// == Page Fetcher Trait ==
/// Origin retrieval for the web cache.
///
/// A trait seam so the cache logic can be exercised without a network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieves the body of `url` from the origin.
    async fn fetch(&self, url: &str) -> Result<String>;
}

// == HTTP Fetcher ==
/// [`PageFetcher`] backed by an HTTP client with a bounded request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let body = response.text().await?;
        Ok(body)
    }
}

// == Access Counter Key ==
/// Counter key for `url`. Access counters never expire.
fn count_key(url: &str) -> String {
    format!("count:{url}")
}

// == Page Cache ==
/// Read-through page cache over the KV store.
pub struct PageCache {
    kv: Arc<dyn KvClient>,
    fetcher: Arc<dyn PageFetcher>,
    ttl: Duration,
}

impl PageCache {
    /// Creates a page cache fetching over HTTP.
    ///
    /// # Arguments
    /// * `kv` - Backing store for cached bodies and access counters
    /// * `ttl` - Lifetime of a cached body
    /// * `timeout` - Outbound request timeout
    pub fn new(kv: Arc<dyn KvClient>, ttl: Duration, timeout: Duration) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(timeout)?);
        Ok(Self::with_fetcher(kv, fetcher, ttl))
    }

    /// Creates a page cache over a custom fetcher.
    pub fn with_fetcher(kv: Arc<dyn KvClient>, fetcher: Arc<dyn PageFetcher>, ttl: Duration) -> Self {
        Self { kv, fetcher, ttl }
    }

    /// Returns the body of `url`, from cache when fresh, from the origin
    /// otherwise.
    ///
    /// The per-URL access counter is incremented first, on every attempt, so
    /// it counts even fetches that subsequently fail. A miss populates the
    /// cache with the configured TTL before returning; origin errors
    /// propagate unchanged.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        self.kv.incr(&count_key(url)).await?;

        if let Some(cached) = self.kv.get(url).await? {
            debug!(url, "page cache hit");
            return decode_text(cached);
        }

        debug!(url, "page cache miss, fetching origin");
        let body = self.fetcher.fetch(url).await?;
        self.kv.set_ex(url, body.as_bytes(), self.ttl).await?;
        Ok(body)
    }

    /// Returns how many times `url` has been requested through this cache,
    /// hit or miss.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        match self.kv.get(&count_key(url)).await? {
            Some(bytes) => crate::cache::decode_int(bytes),
            None => Ok(0),
        }
    }
}
