use tasteshift_catalog::CatalogError;

/// Errors from reconciler setup and theme switching.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("catalog lookup failed: {0}")]
    Catalog(#[from] CatalogError),
}
