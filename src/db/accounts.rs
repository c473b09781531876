use sqlx::SqlitePool;

use crate::error::AppError;
use crate::middleware::auth::{create_token_hash, generate_token};

/// Externally-managed identity. This service never exposes account routes;
/// rows are provisioned out of band (operators, seeds, tests).
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub username: String,
}

pub async fn create_account(pool: &SqlitePool, username: &str) -> Result<Account, AppError> {
    let id = uuid::Uuid::new_v4().simple().to_string();

    sqlx::query("INSERT INTO accounts (id, username) VALUES (?, ?)")
        .bind(&id)
        .bind(username)
        .execute(pool)
        .await?;

    Ok(Account {
        id,
        username: username.to_string(),
    })
}

/// Mint a bearer token for an account, valid for 30 days. Returns the raw
/// token; only its hash is stored.
pub async fn issue_token(pool: &SqlitePool, account_id: &str) -> Result<String, AppError> {
    let expires_at = (chrono::Utc::now() + chrono::Duration::days(30))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string();
    issue_token_with_expiry(pool, account_id, &expires_at).await
}

pub async fn issue_token_with_expiry(
    pool: &SqlitePool,
    account_id: &str,
    expires_at: &str,
) -> Result<String, AppError> {
    let token = generate_token();
    let token_hash = create_token_hash(&token);

    sqlx::query("INSERT INTO account_tokens (token_hash, account_id, expires_at) VALUES (?, ?, ?)")
        .bind(&token_hash)
        .bind(account_id)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(token)
}
