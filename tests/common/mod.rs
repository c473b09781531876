#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use http::{Method, Request};
use sqlx::SqlitePool;

use soundvault::db;
use soundvault::db::accounts::Account;
use soundvault::error::AppError;
use soundvault::routes;
use soundvault::state::AppState;
use soundvault::store::{self, ObjectStore};

/// An account created for testing, bundling the row with its raw token.
pub struct TestAccount {
    pub account: Account,
    pub token: String,
}

impl TestAccount {
    /// Returns the Authorization header value (`"Bearer xxx"`).
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Object store double: records every upload and returns a bucket-style URL
/// without touching the local file at all.
pub struct StubStore {
    /// `(key, url)` per upload, in order.
    pub uploads: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ObjectStore for StubStore {
    async fn upload(&self, _local_path: &Path, key: &str) -> Result<String, AppError> {
        let url = format!("https://bucket/{key}");
        self.uploads
            .lock()
            .unwrap()
            .push((key.to_string(), url.clone()));
        Ok(url)
    }

    async fn remove(&self, _key: &str) -> Result<(), AppError> {
        Ok(())
    }
}

/// Object store double whose uploads always fail, for upstream-failure paths.
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn upload(&self, _local_path: &Path, _key: &str) -> Result<String, AppError> {
        Err(AppError::Storage("bucket rejected the upload".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), AppError> {
        Ok(())
    }
}

/// Test server that owns an in-memory SQLite pool and full AppState.
/// Each instance is isolated — safe for parallel tests.
pub struct TestServer {
    pub state: AppState,
    pub store: Arc<StubStore>,
}

impl TestServer {
    pub async fn new() -> Self {
        let pool = db::create_pool("sqlite::memory:")
            .await
            .expect("failed to create test pool");

        let storage_path = store::temp_storage_path();
        for subdir in &["sounds", "tmp"] {
            std::fs::create_dir_all(storage_path.join(subdir)).ok();
        }

        let stub = Arc::new(StubStore {
            uploads: Mutex::new(Vec::new()),
        });
        let object_store: Arc<dyn ObjectStore> = stub.clone();

        let state = AppState {
            db: pool,
            store: object_store,
            tmp_dir: storage_path.join("tmp"),
            storage_path,
        };

        Self { state, store: stub }
    }

    /// Returns an Axum Router wired to this server's state for `oneshot()` calls.
    pub fn router(&self) -> axum::Router {
        routes::router(self.state.clone())
    }

    /// Same state, different object store — for exercising upstream failures.
    pub fn router_with_store(&self, store: Arc<dyn ObjectStore>) -> axum::Router {
        let mut state = self.state.clone();
        state.store = store;
        routes::router(state)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.db
    }

    /// Create an account and a valid bearer token for it.
    pub async fn create_account_with_token(&self, username: &str) -> TestAccount {
        let account = db::accounts::create_account(self.pool(), username)
            .await
            .expect("failed to create test account");
        let token = db::accounts::issue_token(self.pool(), &account.id)
            .await
            .expect("failed to issue test token");
        TestAccount { account, token }
    }

    /// Create an account whose only token is already expired.
    pub async fn create_account_with_expired_token(&self, username: &str) -> TestAccount {
        let account = db::accounts::create_account(self.pool(), username)
            .await
            .expect("failed to create test account");
        let token =
            db::accounts::issue_token_with_expiry(self.pool(), &account.id, "2000-01-01T00:00:00")
                .await
                .expect("failed to issue test token");
        TestAccount { account, token }
    }

    /// Number of uploads the stub store has seen.
    pub fn upload_count(&self) -> usize {
        self.store.uploads.lock().unwrap().len()
    }

    /// Number of rows in the sounds table.
    pub async fn sound_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM sounds")
            .fetch_one(self.pool())
            .await
            .expect("failed to count sounds")
    }

    /// Number of files left in the intake temp directory.
    pub fn temp_file_count(&self) -> usize {
        std::fs::read_dir(&self.state.tmp_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Request builder helpers
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "soundvault-test-boundary";

/// Build an authenticated request with no body.
pub fn authenticated_request(method: Method, uri: &str, auth_header: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", auth_header)
        .body(Body::empty())
        .unwrap()
}

/// Build a multipart sound-upload request. `title` and each `(filename, bytes)`
/// entry become form parts; `auth_header` is omitted when `None`.
pub fn multipart_sound_request(
    uri: &str,
    auth_header: Option<&str>,
    title: Option<&str>,
    files: &[(&str, &[u8])],
) -> Request<Body> {
    let mut body = Vec::new();

    if let Some(title) = title {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n"
            )
            .as_bytes(),
        );
    }
    for (filename, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"sound\"; filename=\"{filename}\"\r\nContent-Type: audio/mpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(auth) = auth_header {
        builder = builder.header("Authorization", auth);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Parse a response body into a `serde_json::Value`.
pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
