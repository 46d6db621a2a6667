use tasteshift_catalog::CatalogError;
use tasteshift_reconciler::ReconcileError;
use tasteshift_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Startup failures. Once a session runs, failures are logged at the
/// reaction that hit them and never surface here.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
