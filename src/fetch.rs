// src/fetch.rs
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::ReaderConfig;

/// Fixed resource identifier for the provider's region/date discovery index.
/// Consumed by embedding UIs; the store itself never reads it.
pub const INDEX_RESOURCE: &str = "index";

/// Cap on exponential backoff between retry attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// The three things a provider can say about a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Ok(String),
    NotFound,
    Failed(String),
}

/// Content-fetch capability consumed by the store. Implementations map their
/// own transport errors into `FetchOutcome::Failed`; they never panic.
#[async_trait]
pub trait ContentFetch: Send + Sync {
    async fn fetch(&self, resource: &str) -> FetchOutcome;

    /// Head-only existence check, no body transfer. Any failure degrades to
    /// `false`.
    async fn probe(&self, resource: &str) -> bool;
}

/// HTTP implementation against a configured base location. Transient failures
/// (transport errors, 5xx) are retried with exponential backoff; not-found and
/// client errors are terminal. Retry lives here and not in the store: the
/// store's contract is a single logical fetch per cache miss.
pub struct HttpContentFetch {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl HttpContentFetch {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    pub fn from_config(cfg: &ReaderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .context("building http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
            max_retries: cfg.max_retries,
            base_delay: Duration::from_millis(cfg.retry_base_delay_ms),
        })
    }

    fn url_for(&self, resource: &str) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), resource)
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(1u32 << attempt.min(16))
            .min(MAX_RETRY_DELAY)
    }

    /// One GET. `Err` carries a transient failure worth retrying.
    async fn get_once(&self, url: &str) -> std::result::Result<FetchOutcome, String> {
        let resp = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => return Err(format!("transport error: {e}")),
        };
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(FetchOutcome::NotFound);
        }
        if status.is_server_error() {
            return Err(format!("provider returned status {status}"));
        }
        if !status.is_success() {
            return Ok(FetchOutcome::Failed(format!(
                "provider returned status {status}"
            )));
        }
        match resp.text().await {
            Ok(body) => Ok(FetchOutcome::Ok(body)),
            Err(e) => Err(format!("reading body: {e}")),
        }
    }
}

#[async_trait]
impl ContentFetch for HttpContentFetch {
    async fn fetch(&self, resource: &str) -> FetchOutcome {
        let url = self.url_for(resource);
        let mut attempt = 0u32;
        loop {
            match self.get_once(&url).await {
                Ok(outcome) => return outcome,
                Err(reason) => {
                    if attempt >= self.max_retries {
                        return FetchOutcome::Failed(format!(
                            "giving up after {} attempts: {reason}",
                            attempt + 1
                        ));
                    }
                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(
                        resource,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        %reason,
                        "transient fetch failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn probe(&self, resource: &str) -> bool {
        match self.client.head(self.url_for(resource)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}
