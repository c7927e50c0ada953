// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod classify;
pub mod config;
pub mod enrich;
pub mod github;
pub mod merge;
pub mod metrics;
pub mod model;
pub mod refresh;
pub mod snapshot;

// ---- Re-exports for stable public API ----
pub use crate::github::{ContributorApi, GithubClient, RequestError};
pub use crate::snapshot::SnapshotStore;
