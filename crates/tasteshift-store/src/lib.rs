//! Persisted user preferences.
//!
//! A small SQLite database (pooled with `r2d2`, WAL mode) holds the few
//! facts that outlive a page load: the last chosen theme, the optional
//! speech-API credential and the informational lookup backend URL. The
//! schema is created by embedded migrations.

mod migrations;
mod pool;
mod prefs;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
pub use prefs::{PreferenceKey, PreferenceStore, StoreError};
