//! Key/value preferences on top of the pool.

use rusqlite::{params, OptionalExtension};
use tasteshift_types::ThemeId;
use thiserror::Error;

use crate::{create_pool, run_migrations, DbPool, DbRuntimeSettings, MigrationError, PoolError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("failed to check out a connection: {0}")]
    Connection(#[from] r2d2::Error),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("preference query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// The preferences that survive a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    Theme,
    SpeechApiKey,
    LookupUrl,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::Theme => "selectedTheme",
            PreferenceKey::SpeechApiKey => "speechApiKey",
            PreferenceKey::LookupUrl => "lookupBackendUrl",
        }
    }
}

/// Handle to the preference database. Cheap to clone.
#[derive(Clone)]
pub struct PreferenceStore {
    pool: DbPool,
}

impl PreferenceStore {
    /// Opens the database at `path` and brings its schema up to date.
    pub fn open(path: &str, settings: DbRuntimeSettings) -> Result<Self, StoreError> {
        let pool = create_pool(path, settings)?;
        let conn = pool.get()?;
        let applied = run_migrations(&conn)?;
        tracing::debug!(path, applied, "preference store ready");
        drop(conn);
        Ok(Self { pool })
    }

    /// Single-connection in-memory store.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(
            ":memory:",
            DbRuntimeSettings {
                pool_max_size: 1,
                ..DbRuntimeSettings::default()
            },
        )
    }

    pub fn get(&self, key: PreferenceKey) -> Result<Option<String>, StoreError> {
        let conn = self.pool.get()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: PreferenceKey, value: &str) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                 updated_at = datetime('now')",
            params![key.as_str(), value],
        )?;
        Ok(())
    }

    /// Returns whether a value was removed.
    pub fn clear(&self, key: PreferenceKey) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM preferences WHERE key = ?1", [key.as_str()])?;
        Ok(removed > 0)
    }

    /// The last chosen theme. A stored value that no longer names a theme
    /// is treated as absent.
    pub fn theme(&self) -> Result<Option<ThemeId>, StoreError> {
        let Some(raw) = self.get(PreferenceKey::Theme)? else {
            return Ok(None);
        };
        match raw.parse() {
            Ok(theme) => Ok(Some(theme)),
            Err(err) => {
                tracing::warn!(value = %raw, error = %err, "ignoring stored theme");
                Ok(None)
            }
        }
    }

    pub fn set_theme(&self, theme: ThemeId) -> Result<(), StoreError> {
        self.set(PreferenceKey::Theme, theme.as_str())
    }

    /// An empty stored credential counts as none.
    pub fn speech_api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .get(PreferenceKey::SpeechApiKey)?
            .filter(|key| !key.trim().is_empty()))
    }

    pub fn set_speech_api_key(&self, key: &str) -> Result<(), StoreError> {
        self.set(PreferenceKey::SpeechApiKey, key.trim())
    }

    pub fn lookup_url(&self) -> Result<Option<String>, StoreError> {
        self.get(PreferenceKey::LookupUrl)
    }

    pub fn set_lookup_url(&self, url: &str) -> Result<(), StoreError> {
        self.set(PreferenceKey::LookupUrl, url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}
