//! SQLite generation-history store.
//!
//! Implements `HistoryStore` from `studio-core` using sqlx. Timestamps
//! are stored as RFC 3339 text so `ORDER BY created_at` sorts correctly.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use std::path::Path;

use studio_core::history::HistoryStore;
use studio_types::error::RepositoryError;
use studio_types::media::{HistoryEntry, HistoryKind};

/// SQLite-backed implementation of `HistoryStore`.
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// Open (creating if needed) the database at `path` and run the
    /// schema migration.
    pub async fn connect(path: &Path) -> Result<Self, RepositoryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|_| RepositoryError::Connection)?;
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .map_err(|_| RepositoryError::Connection)?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS generation_history (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                prompt TEXT NOT NULL,
                payload TEXT NOT NULL,
                created_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct HistoryRow {
    id: String,
    kind: String,
    prompt: String,
    payload: String,
    created_at: String,
}

impl HistoryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            kind: row.try_get("kind")?,
            prompt: row.try_get("prompt")?,
            payload: row.try_get("payload")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_entry(self) -> Result<HistoryEntry, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid id: {e}")))?;
        let kind: HistoryKind = self
            .kind
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid kind: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(HistoryEntry {
            id,
            kind,
            prompt: self.prompt,
            payload: self.payload,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

// ---------------------------------------------------------------------------
// HistoryStore implementation
// ---------------------------------------------------------------------------

impl HistoryStore for SqliteHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryEntry>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM generation_history ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let history_row =
                HistoryRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            entries.push(history_row.into_entry()?);
        }

        Ok(entries)
    }

    async fn save(&self, entry: &HistoryEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO generation_history (id, kind, prompt, payload, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(entry.kind.to_string())
        .bind(&entry.prompt)
        .bind(&entry.payload)
        .bind(entry.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM generation_history")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
