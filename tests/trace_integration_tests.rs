//! Integration Tests for the Instrumented Cache
//!
//! Exercises the full pipeline over the in-memory client: entry storage,
//! call counting, history recording, replay and the read-through web cache.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use kvtrace::cache::STORE_OP_NAME;
use kvtrace::trace::{input_key, output_key, CallRecord, ResultRecord};
use kvtrace::web::PageFetcher;
use kvtrace::{replay, Cache, KvClient, MemoryClient, PageCache, Result, Scalar};

// == Helper Functions ==

fn fresh_cache() -> (Arc<MemoryClient>, Cache) {
    let client = Arc::new(MemoryClient::new());
    let cache = Cache::new(client.clone());
    (client, cache)
}

struct StubFetcher {
    body: String,
    fetches: AtomicUsize,
}

impl StubFetcher {
    fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

// == Entry Store Round Trips ==

#[tokio::test]
async fn test_round_trip_text() {
    let (_, cache) = fresh_cache();

    let key = cache.store("some text").await.unwrap();
    assert_eq!(cache.get_str(&key).await.unwrap(), Some("some text".to_string()));
}

#[tokio::test]
async fn test_round_trip_integer() {
    let (_, cache) = fresh_cache();

    let key = cache.store(-7i64).await.unwrap();
    assert_eq!(cache.get_int(&key).await.unwrap(), Some(-7));
}

#[tokio::test]
async fn test_round_trip_binary() {
    let (_, cache) = fresh_cache();

    let payload: Vec<u8> = (0..=255).collect();
    let key = cache.store(payload.clone()).await.unwrap();
    assert_eq!(cache.get(&key).await.unwrap(), Some(payload));
}

#[tokio::test]
async fn test_identical_values_are_not_deduplicated() {
    let (_, cache) = fresh_cache();

    let mut keys = Vec::new();
    for _ in 0..10 {
        keys.push(cache.store("same value").await.unwrap());
    }

    let unique: std::collections::HashSet<_> = keys.iter().collect();
    assert_eq!(unique.len(), keys.len(), "every store call must mint a fresh key");
}

#[tokio::test]
async fn test_absent_key_reads_as_none() {
    let (_, cache) = fresh_cache();

    assert!(cache.get("no-such-key").await.unwrap().is_none());
    assert!(cache.get_str("no-such-key").await.unwrap().is_none());
}

// == Call Counting ==

#[tokio::test]
async fn test_concurrent_stores_count_exactly() {
    let (client, cache) = fresh_cache();
    let cache = Arc::new(cache);

    let mut handles = Vec::new();
    for i in 0..32i64 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache.store(i).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let count = client.get(STORE_OP_NAME).await.unwrap().unwrap();
    assert_eq!(count, b"32");
}

// == History Recording ==

#[tokio::test]
async fn test_history_logs_pair_inputs_with_outputs() {
    let (client, cache) = fresh_cache();

    let values = ["alpha", "beta", "gamma"];
    let mut keys = Vec::new();
    for value in values {
        keys.push(cache.store(value).await.unwrap());
    }

    let inputs = client.lrange(&input_key(STORE_OP_NAME), 0, -1).await.unwrap();
    let outputs = client.lrange(&output_key(STORE_OP_NAME), 0, -1).await.unwrap();
    assert_eq!(inputs.len(), values.len());
    assert_eq!(outputs.len(), values.len());

    for (i, value) in values.iter().enumerate() {
        let input = CallRecord::decode(&inputs[i]).unwrap();
        assert_eq!(input.args, vec![Scalar::from(*value)]);

        // The i-th output is the key returned by the i-th call
        let output = ResultRecord::decode(&outputs[i]).unwrap();
        assert_eq!(output.result, keys[i]);
    }
}

// == Replay ==

#[tokio::test]
async fn test_replay_transcript_shape() {
    let (client, cache) = fresh_cache();

    let key1 = cache.store("foo").await.unwrap();
    let key2 = cache.store("bar").await.unwrap();

    let transcript = replay(client.as_ref(), STORE_OP_NAME).await.unwrap();
    let lines: Vec<&str> = transcript.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Cache::store was called 2 times:");
    assert_eq!(lines[1], format!(r#"Cache::store(*[{{"text":"foo"}}]) -> {key1}"#));
    assert_eq!(lines[2], format!(r#"Cache::store(*[{{"text":"bar"}}]) -> {key2}"#));
}

// == Web Cache ==

#[tokio::test]
async fn test_web_cache_hit_within_ttl() {
    let client = Arc::new(MemoryClient::new());
    let fetcher = Arc::new(StubFetcher::new("<html>cached</html>"));
    let pages = PageCache::with_fetcher(client, fetcher.clone(), Duration::from_secs(10));

    let first = pages.get_page("http://example.com/page").await.unwrap();
    let second = pages.get_page("http://example.com/page").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(pages.access_count("http://example.com/page").await.unwrap(), 2);
}

#[tokio::test]
async fn test_web_cache_refetches_after_ttl() {
    let client = Arc::new(MemoryClient::new());
    let fetcher = Arc::new(StubFetcher::new("body"));
    let pages = PageCache::with_fetcher(client, fetcher.clone(), Duration::from_millis(60));

    pages.get_page("http://example.com").await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    pages.get_page("http://example.com").await.unwrap();

    assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 2);
}

// == Wipe And Init ==

#[tokio::test]
async fn test_wipe_and_init_resets_counters_and_history() {
    let (client, cache) = fresh_cache();

    cache.store("doomed").await.unwrap();
    cache.wipe_and_init().await.unwrap();

    assert!(client.get(STORE_OP_NAME).await.unwrap().is_none());
    assert!(client
        .lrange(&input_key(STORE_OP_NAME), 0, -1)
        .await
        .unwrap()
        .is_empty());

    // The cache keeps working after a wipe
    let key = cache.store("reborn").await.unwrap();
    assert_eq!(cache.get_str(&key).await.unwrap(), Some("reborn".to_string()));
}
