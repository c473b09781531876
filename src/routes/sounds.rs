use axum::extract::{Multipart, Path, State};
use axum::Json;

use crate::db;
use crate::error::AppError;
use crate::intake;
use crate::middleware::auth::AuthAccount;
use crate::models::sound::{NewSound, Sound};
use crate::state::AppState;

/// POST /api/sounds — multipart form with a `title` field and exactly one
/// attached file. Uploads the file to the object store, persists the record,
/// and responds with it.
pub async fn create_sound(
    state: State<AppState>,
    auth: AuthAccount,
    multipart: Multipart,
) -> Result<Json<Sound>, AppError> {
    let form = intake::parse_form(multipart, &state.tmp_dir).await?;

    let title = match form.field("title") {
        Some(title) => title.to_string(),
        None => {
            intake::discard(&form.files).await;
            return Err(AppError::BadRequest("title is required".to_string()));
        }
    };
    if form.files.len() != 1 {
        intake::discard(&form.files).await;
        return Err(AppError::BadRequest(
            "exactly one attached file is required".to_string(),
        ));
    }

    let file = &form.files[0];
    let key = crate::store::object_key(&file.file_name, &file.original_name);
    tracing::info!(
        "uploading {} for account {} under key {key}",
        file.original_name,
        auth.account_id
    );

    let uploaded = state.store.upload(&file.path, &key).await;
    // The temp file has served its purpose either way
    intake::discard(&form.files).await;
    let url = uploaded?;

    let sound = db::sounds::create_sound(
        &state.db,
        &NewSound {
            title,
            url,
            file_name: Some(key),
            account_id: auth.account_id.clone(),
        },
    )
    .await?;

    tracing::info!("created sound {} at {}", sound.id, sound.url);
    Ok(Json(sound))
}

/// GET /api/sounds/{id}
pub async fn get_sound(
    state: State<AppState>,
    Path(sound_id): Path<String>,
    _auth: AuthAccount,
) -> Result<Json<Sound>, AppError> {
    let sound = db::sounds::get_sound(&state.db, &sound_id).await?;
    Ok(Json(sound))
}

/// GET /api/sounds — the id path parameter is required.
pub async fn get_sound_missing_id(_auth: AuthAccount) -> Result<Json<Sound>, AppError> {
    Err(AppError::BadRequest("no id provided".to_string()))
}
