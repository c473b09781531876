use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::store::ObjectStore;

/// Shared handles for the request handlers. Everything here is constructed
/// explicitly in `main` (or in tests, which swap the store for a stub).
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub store: Arc<dyn ObjectStore>,
    /// Directory where upload intake parks temp files before the store upload.
    pub tmp_dir: PathBuf,
    /// Root of the local CDN tree served under `/cdn`.
    pub storage_path: PathBuf,
}
