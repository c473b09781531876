use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Persisted sound record. Serialized camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sound {
    pub id: String,
    pub title: String,
    pub url: String,
    pub file_name: Option<String>,
    pub account_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for a sound about to be persisted. `validate` runs before any row
/// is constructed, so a violation never reaches the database.
#[derive(Debug)]
pub struct NewSound {
    pub title: String,
    pub url: String,
    pub file_name: Option<String>,
    pub account_id: String,
}

impl NewSound {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_string()));
        }
        if self.url.trim().is_empty() {
            return Err(AppError::BadRequest("url is required".to_string()));
        }
        if self.account_id.trim().is_empty() {
            return Err(AppError::BadRequest("accountId is required".to_string()));
        }
        Ok(())
    }
}
