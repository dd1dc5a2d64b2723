// src/error.rs
use crate::types::BulletinKey;

/// Everything `resolve` can report. `exists` and `prefetch` swallow all of
/// these by signature; no variant is retried automatically inside the store.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The provider has published nothing under this key yet. Expected and
    /// recoverable; callers render it as "not yet available", not as an error.
    #[error("no bulletin published for {0}")]
    NotFound(BulletinKey),

    /// Transport or provider failure. Recoverable by a caller-initiated retry.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// The body could not be parsed as JSON at all.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Parsed but structurally invalid. The message names the first offending
    /// field or article index; this indicates a producer-side defect.
    #[error("invalid bulletin schema: {0}")]
    SchemaInvalid(String),
}

impl ResolveError {
    /// Whether a later caller-initiated retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ResolveError::NotFound(_) | ResolveError::FetchFailed(_)
        )
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
