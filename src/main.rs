//! kvtrace demo binary
//!
//! Wires the instrumented cache up against the in-memory KV client: stores a
//! few scalar values, reads them back, prints the replay transcript of the
//! store operation, and optionally exercises the read-through web cache
//! against a URL passed as the first argument.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kvtrace::cache::STORE_OP_NAME;
use kvtrace::{replay, spawn_sweep_task, Cache, Config, MemoryClient, PageCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kvtrace=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting kvtrace demo");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: page_ttl={}s, http_timeout={}s, sweep_interval={}s",
        config.page_ttl, config.http_timeout, config.sweep_interval
    );

    let client = Arc::new(MemoryClient::new());
    let sweep_handle = spawn_sweep_task(client.engine(), config.sweep_interval);

    // Explicit wipe: construction alone never resets the store
    let cache = Cache::new(client.clone());
    cache.wipe_and_init().await?;

    let text_key = cache.store("hello kvtrace").await?;
    let int_key = cache.store(42i64).await?;
    let bin_key = cache.store(vec![0u8, 1, 2, 3]).await?;

    info!(
        "stored text under {}: {:?}",
        text_key,
        cache.get_str(&text_key).await?
    );
    info!(
        "stored int under {}: {:?}",
        int_key,
        cache.get_int(&int_key).await?
    );
    info!(
        "stored {} raw bytes under {}",
        cache.get(&bin_key).await?.map(|b| b.len()).unwrap_or(0),
        bin_key
    );

    let transcript = replay(client.as_ref(), STORE_OP_NAME).await?;
    print!("{transcript}");

    if let Some(url) = std::env::args().nth(1) {
        let pages = PageCache::new(
            client.clone(),
            Duration::from_secs(config.page_ttl),
            Duration::from_secs(config.http_timeout),
        )?;

        let body = pages.get_page(&url).await?;
        info!("fetched {} ({} bytes)", url, body.len());

        // Second read inside the TTL window comes from the cache
        let cached = pages.get_page(&url).await?;
        info!(
            "re-read {} ({} bytes), access count {}",
            url,
            cached.len(),
            pages.access_count(&url).await?
        );
    }

    sweep_handle.abort();
    info!("Demo complete");
    Ok(())
}
