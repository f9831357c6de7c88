//! Application state wiring the services together.
//!
//! AppState holds the shared Gemini client, the SQLite history store, and
//! the in-memory registry of live prompt-builder sessions. The bot is
//! generic over its service ports; here it is pinned to the Gemini client
//! backing both.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use secrecy::SecretString;
use tokio::sync::Mutex;
use uuid::Uuid;

use studio_core::promptbot::PromptBot;
use studio_infra::gemini::GeminiClient;
use studio_infra::history::{SqliteHistoryStore, default_db_path};

/// Concrete prompt bot pinned to the shared Gemini client for both ports.
pub type StudioBot = PromptBot<Arc<GeminiClient>, Arc<GeminiClient>>;

/// Shared application state used by all REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub gemini: Arc<GeminiClient>,
    pub history: Arc<SqliteHistoryStore>,
    /// Live prompt-builder sessions, keyed by session id. Each session is
    /// serialized behind its own mutex; operations on one session never
    /// block another.
    pub sessions: Arc<DashMap<Uuid, Arc<Mutex<StudioBot>>>>,
}

impl AppState {
    /// Initialize the application state: read configuration from the
    /// environment, open the database, build the Gemini client.
    ///
    /// * `GEMINI_API_KEY` (required) - provider API key.
    /// * `STUDIO_DB_PATH` (optional) - history database location.
    pub async fn init() -> anyhow::Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map(SecretString::from)
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable is not set"))?;

        let db_path = std::env::var("STUDIO_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_db_path());
        let history = SqliteHistoryStore::connect(&db_path)
            .await
            .map_err(|e| anyhow::anyhow!("failed to open history database: {e}"))?;

        Ok(Self {
            gemini: Arc::new(GeminiClient::new(api_key)),
            history: Arc::new(history),
            sessions: Arc::new(DashMap::new()),
        })
    }

    /// Register a fresh prompt-builder session and return its id.
    pub fn create_session(&self) -> Uuid {
        let id = Uuid::now_v7();
        let bot = PromptBot::new(Arc::clone(&self.gemini), Arc::clone(&self.gemini));
        self.sessions.insert(id, Arc::new(Mutex::new(bot)));
        id
    }

    /// Look up a live session by id.
    pub fn session(&self, id: &Uuid) -> Option<Arc<Mutex<StudioBot>>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Drop a session from the registry. Returns whether it existed.
    pub fn remove_session(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }
}
