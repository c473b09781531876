use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::state::AppState;

/// Authenticated requester, resolved from a bearer token and attached to the
/// request by the extractor below.
#[derive(Debug, Clone)]
pub struct AuthAccount {
    pub account_id: String,
    pub username: String,
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

// Any token that cannot be resolved reads as unauthenticated, including a
// failed lookup query.
async fn resolve_bearer_token(pool: &SqlitePool, token: &str) -> Option<AuthAccount> {
    let token_hash = hash_token(token);
    let row = sqlx::query_as::<_, (String, String, String)>(
        "SELECT at.account_id, a.username, at.expires_at FROM account_tokens at JOIN accounts a ON at.account_id = a.id WHERE at.token_hash = ?",
    )
    .bind(&token_hash)
    .fetch_optional(pool)
    .await
    .ok()??;

    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    if row.2 < now {
        return None;
    }

    Some(AuthAccount {
        account_id: row.0,
        username: row.1,
    })
}

/// Rejection type for when auth fails.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": "unauthorized",
                "message": "invalid or missing authentication"
            }
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let pool = state.db.clone();
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        async move {
            let account = match auth_header {
                Some(header) if header.starts_with("Bearer ") => {
                    resolve_bearer_token(&pool, &header[7..]).await
                }
                _ => None,
            };

            account.ok_or(AuthRejection)
        }
    }
}

/// Helper to create a token hash for token creation.
pub fn create_token_hash(token: &str) -> String {
    hash_token(token)
}

/// Generate a random token string.
pub fn generate_token() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let random: u64 = rand::random();
    format!("{ts:x}.{random:x}")
}
