//! Generation-history persistence.

mod sqlite;

pub use sqlite::SqliteHistoryStore;

use std::path::PathBuf;

/// Default on-disk location for the studio database, under the platform
/// data directory. Falls back to the current directory when the platform
/// provides none.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("creator-studio")
        .join("studio.db")
}
