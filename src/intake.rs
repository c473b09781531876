use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;

use crate::error::AppError;
use crate::store::MAX_UPLOAD_SIZE;

/// A single uploaded file parked in the intake temp directory.
#[derive(Debug)]
pub struct UploadedFile {
    /// Generated name of the temp file (uuid, no extension).
    pub file_name: String,
    /// File name the client sent in the multipart part.
    pub original_name: String,
    /// Local temp path holding the bytes until the store upload runs.
    pub path: PathBuf,
}

/// Result of parsing a multipart form body: text fields as a map, file parts
/// as an ordered list of temp-file descriptors. Validation of field presence
/// and file count is left to the handler.
#[derive(Debug, Default)]
pub struct ParsedForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl ParsedForm {
    /// Non-empty trimmed value of a text field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Parse a multipart body, writing every file part to `tmp_dir` under a
/// generated name. Parts above `MAX_UPLOAD_SIZE` fail with 413. On any parse
/// failure, temp files already written for this request are removed before
/// the error propagates.
pub async fn parse_form(multipart: Multipart, tmp_dir: &Path) -> Result<ParsedForm, AppError> {
    let mut form = ParsedForm::default();
    match read_parts(&mut form, multipart, tmp_dir).await {
        Ok(()) => Ok(form),
        Err(e) => {
            discard(&form.files).await;
            Err(e)
        }
    }
}

async fn read_parts(
    form: &mut ParsedForm,
    mut multipart: Multipart,
    tmp_dir: &Path,
) -> Result<(), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        if let Some(original) = field.file_name() {
            let original_name = if original.is_empty() {
                "upload".to_string()
            } else {
                original.to_string()
            };

            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read file part: {e}")))?;
            if bytes.len() > MAX_UPLOAD_SIZE {
                return Err(AppError::PayloadTooLarge(format!(
                    "file exceeds maximum size of {} MB",
                    MAX_UPLOAD_SIZE / (1024 * 1024)
                )));
            }

            tokio::fs::create_dir_all(tmp_dir)
                .await
                .map_err(|e| AppError::Internal(format!("failed to create temp directory: {e}")))?;

            let file_name = uuid::Uuid::new_v4().simple().to_string();
            let path = tmp_dir.join(&file_name);
            tokio::fs::write(&path, &bytes)
                .await
                .map_err(|e| AppError::Internal(format!("failed to write temp file: {e}")))?;

            form.files.push(UploadedFile {
                file_name,
                original_name,
                path,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read form field: {e}")))?;
            form.fields.insert(name, value);
        }
    }

    Ok(())
}

/// Best-effort removal of intake temp files. Failures are logged, never fatal.
pub async fn discard(files: &[UploadedFile]) {
    for file in files {
        if let Err(e) = tokio::fs::remove_file(&file.path).await {
            tracing::warn!("failed to remove temp file {:?}: {e}", file.path);
        }
    }
}
