//! Generation-history persistence port.
//!
//! Keeps the studio core free of storage concerns: the builder and the
//! media handlers record results through this trait, and `studio-infra`
//! provides the SQLite implementation.

use std::future::Future;

use studio_types::error::RepositoryError;
use studio_types::media::HistoryEntry;

/// Trait for persisting generation results.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait HistoryStore: Send + Sync {
    /// Load all entries, newest first.
    fn load(&self) -> impl Future<Output = Result<Vec<HistoryEntry>, RepositoryError>> + Send;

    /// Append one entry.
    fn save(
        &self,
        entry: &HistoryEntry,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove all entries.
    fn clear(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
