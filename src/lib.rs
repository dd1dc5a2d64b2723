// src/lib.rs
// Public library surface for integration tests (and embedding UIs).

pub mod config;
pub mod error;
pub mod fetch;
pub mod store;
pub mod types;
pub mod validate;
pub mod window;

// ---- Re-exports for stable public API ----
pub use crate::config::ReaderConfig;
pub use crate::error::{ResolveError, ResolveResult};
pub use crate::fetch::{ContentFetch, FetchOutcome, HttpContentFetch, INDEX_RESOURCE};
pub use crate::store::BulletinStore;
pub use crate::types::{Article, Bulletin, BulletinKey, Citation, Period, Region, Source};
pub use crate::window::DateWindow;
