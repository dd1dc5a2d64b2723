//! Demo that resolves today's (usa, morning) bulletin against a configured
//! provider and warms the neighboring dates (stdout/log only).

use std::sync::Arc;

use bulletin_reader::{
    BulletinStore, DateWindow, HttpContentFetch, Period, ReaderConfig, Region, ResolveError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = ReaderConfig::load_default()?;
    let fetcher = Arc::new(HttpContentFetch::from_config(&cfg)?);
    let store = BulletinStore::new(fetcher);

    let window = DateWindow::new();
    let key = window.key_for(Region::Usa, Period::Morning);
    println!("{} — {}", window.display_label(), key);

    match store.resolve(&key).await {
        Ok(b) => println!("{} articles, generated {}", b.articles.len(), b.generated_at),
        Err(ResolveError::NotFound(k)) => println!("not yet available: {k}"),
        Err(e) => println!("failed ({}retryable): {e}", if e.is_retryable() { "" } else { "not " }),
    }

    // Best-effort; give the detached tasks a moment before the process exits.
    store.prefetch(&key);
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    println!("reader-demo done");
    Ok(())
}
