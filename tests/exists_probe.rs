//! `exists` is a head-only probe that degrades to `false` instead of raising.

mod common;

use std::sync::Arc;

use bulletin_reader::{BulletinStore, FetchOutcome};
use common::{bulletin_json, key, FakeFetch};

#[tokio::test]
async fn exists_reflects_provider_state() {
    let fetch = Arc::new(FakeFetch::new());
    let store = BulletinStore::new(fetch.clone());
    let published = key("usa", "2025-01-10", "morning");
    let unpublished = key("usa", "2025-01-11", "morning");
    fetch.serve_json(
        &published.resource_path(),
        bulletin_json("usa", "2025-01-10", "morning", 1),
    );

    assert!(store.exists(&published).await);
    assert!(!store.exists(&unpublished).await);
    assert_eq!(fetch.fetch_count(), 0, "probe must not transfer a body");
    assert_eq!(fetch.probe_count(), 2);
}

#[tokio::test]
async fn exists_degrades_to_false_on_provider_failure() {
    let fetch = Arc::new(FakeFetch::new());
    let store = BulletinStore::new(fetch.clone());
    let k = key("india", "2025-01-10", "evening");
    fetch.serve(
        &k.resource_path(),
        FetchOutcome::Failed("provider returned status 503".into()),
    );

    // More lenient than resolve: a broken provider reads as "does not exist".
    assert!(!store.exists(&k).await);
}

#[tokio::test]
async fn exists_skips_the_probe_for_cached_keys() {
    let fetch = Arc::new(FakeFetch::new());
    let store = BulletinStore::new(fetch.clone());
    let k = key("usa", "2025-01-10", "morning");
    fetch.serve_json(&k.resource_path(), bulletin_json("usa", "2025-01-10", "morning", 1));

    store.resolve(&k).await.expect("resolve");
    assert!(store.exists(&k).await);
    assert_eq!(fetch.probe_count(), 0, "cached key needs no probe");
}
