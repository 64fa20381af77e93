// src/lib.rs
//! Job recommendation client: profile store, job normalization, scoring
//! service client and confidence ranking.

pub mod cli;
pub mod context;
pub mod core;
pub mod error;
pub mod normalizer;
pub mod notify;
pub mod profile_store;
pub mod ranking;
pub mod recommendation;
pub mod types;

/// Structured log line routed through `tracing`.
///
/// `app_log!(info, "Fetched {} jobs", n)` expands to `tracing::info!(...)`.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

pub use crate::context::{AppContext, RefreshOutcome};
pub use crate::core::{ConfigManager, Database, KeyValueStore, MemoryStore, ServiceClient};
pub use crate::error::JobMatchError;
pub use crate::normalizer::{normalize_batch, normalize_job};
pub use crate::notify::{Notification, Notifier};
pub use crate::profile_store::ProfileStore;
pub use crate::ranking::rank_by_confidence;
pub use crate::recommendation::RecommendationClient;
pub use crate::types::{Education, Experience, Job, Profile};
