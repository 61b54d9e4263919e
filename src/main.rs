//! Recency Cache - interactive shell
//!
//! Reads cache commands from stdin and writes one JSON document per line:
//! eviction events first, then the command's response.

use anyhow::Context;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recency_cache::shell::{self, EvictEvent, Response};
use recency_cache::{CacheOptions, LruCache};

/// Entry point for the cache shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load cache options from environment variables
/// 3. Create the cache and subscribe to its evictions
/// 4. Serve commands from stdin until EOF
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = CacheOptions::from_env();
    options.validate().context("invalid CACHE_MAX")?;
    info!(
        "Configuration loaded: max={}, ttl={}ms",
        options.max, options.ttl
    );

    let mut cache: LruCache<String> = LruCache::new(options);
    let mut evictions = cache.subscribe();

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let response = shell::handle_line(&mut cache, &line);
        if let Response::Error { message } = &response {
            warn!("Rejected input {:?}: {}", line, message);
        }

        while let Ok(eviction) = evictions.try_recv() {
            info!(key = %eviction.key, reason = ?eviction.reason, "Entry evicted");
            write_json(&mut stdout, &EvictEvent::from(eviction)).await?;
        }
        write_json(&mut stdout, &response).await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}

async fn write_json<T: serde::Serialize>(out: &mut io::Stdout, value: &T) -> anyhow::Result<()> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    out.write_all(&line).await?;
    out.flush().await?;
    Ok(())
}
