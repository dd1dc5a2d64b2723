// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bulletin_reader::{BulletinKey, ContentFetch, FetchOutcome, Period, Region};
use chrono::NaiveDate;
use serde_json::json;

/// Scripted provider: maps resource identifiers to outcomes, counts calls,
/// and can delay every fetch to simulate a slow network. Unscripted
/// identifiers answer not-found.
pub struct FakeFetch {
    responses: Mutex<HashMap<String, FetchOutcome>>,
    fetch_calls: AtomicUsize,
    probe_calls: AtomicUsize,
    delay: Option<Duration>,
}

impl FakeFetch {
    pub fn new() -> Self {
        Self::build(None)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self::build(Some(delay))
    }

    fn build(delay: Option<Duration>) -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            fetch_calls: AtomicUsize::new(0),
            probe_calls: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn serve(&self, resource: &str, outcome: FetchOutcome) {
        self.responses
            .lock()
            .unwrap()
            .insert(resource.to_string(), outcome);
    }

    pub fn serve_json(&self, resource: &str, body: serde_json::Value) {
        self.serve(resource, FetchOutcome::Ok(body.to_string()));
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn probe_count(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentFetch for FakeFetch {
    async fn fetch(&self, resource: &str) -> FetchOutcome {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        self.responses
            .lock()
            .unwrap()
            .get(resource)
            .cloned()
            .unwrap_or(FetchOutcome::NotFound)
    }

    async fn probe(&self, resource: &str) -> bool {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        matches!(
            self.responses.lock().unwrap().get(resource),
            Some(FetchOutcome::Ok(_))
        )
    }
}

pub fn key(region: &str, date: &str, period: &str) -> BulletinKey {
    BulletinKey::new(
        Region::from_str(region).unwrap(),
        NaiveDate::from_str(date).unwrap(),
        Period::from_str(period).unwrap(),
    )
}

/// A wire-valid bulletin payload with `count` articles.
pub fn bulletin_json(region: &str, date: &str, period: &str, count: usize) -> serde_json::Value {
    let articles: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "title": format!("Headline {i}"),
                "summary": format!("Summary text for article {i}."),
                "category": "politics",
                "source": { "name": "Wire", "url": "https://wire.example.com" },
                "citations": [
                    { "url": "https://ref.example.com", "title": "Reference" }
                ]
            })
        })
        .collect();
    json!({
        "bulletin": {
            "region": region,
            "date": date,
            "period": period,
            "generated_at": format!("{date}T06:00:00Z"),
            "articles": articles
        }
    })
}
