use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::AppError;

/// Maximum accepted size for an uploaded audio file.
pub const MAX_UPLOAD_SIZE: usize = 25 * 1024 * 1024; // 25 MB

/// A remote blob service addressed by key. Uploading a local file yields a
/// durable URL that clients can fetch directly. Implementations must be
/// thread-safe; handlers hold them behind `Arc<dyn ObjectStore>` so tests can
/// substitute a stub.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `local_path` under `key`. Returns the public URL.
    async fn upload(&self, local_path: &Path, key: &str) -> Result<String, AppError>;

    /// Remove the object stored under `key`. Idempotent.
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Disk-backed bucket whose objects are served by the router under
/// `/cdn/sounds/`. Returned URLs are absolute, rooted at the configured
/// public base URL.
pub struct LocalBucket {
    root: PathBuf,
    public_url: String,
}

impl LocalBucket {
    pub fn new(storage_path: &Path, public_url: &str) -> Self {
        Self {
            root: storage_path.join("sounds"),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_key(key))
    }
}

#[async_trait]
impl ObjectStore for LocalBucket {
    async fn upload(&self, local_path: &Path, key: &str) -> Result<String, AppError> {
        let key = sanitize_key(key);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Storage(format!("failed to create bucket directory: {e}")))?;

        let dest = self.root.join(&key);
        tokio::fs::copy(local_path, &dest)
            .await
            .map_err(|e| AppError::Storage(format!("failed to store object {key}: {e}")))?;

        Ok(format!("{}/cdn/sounds/{key}", self.public_url))
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.object_path(key);
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| AppError::Storage(format!("failed to remove object {key}: {e}")))?;
        }
        Ok(())
    }
}

/// Compose the storage key for an upload: generated temp name plus the
/// client's original file name, sanitized as one unit.
pub fn object_key(generated_name: &str, original_name: &str) -> String {
    sanitize_key(&format!("{generated_name}.{original_name}"))
}

/// Sanitize a storage key to prevent directory traversal.
fn sanitize_key(key: &str) -> String {
    let key = key.replace(['/', '\\', '\0'], "_");
    let key = key.trim_start_matches('.');
    if key.is_empty() {
        "object".to_string()
    } else {
        key.to_string()
    }
}

/// Fresh per-test storage root under the system temp directory.
pub fn temp_storage_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("soundvault-test-{}", uuid::Uuid::new_v4().simple()));
    path
}
