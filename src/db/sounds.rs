use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::sound::{NewSound, Sound};

type SoundRow = (
    String,
    String,
    String,
    Option<String>,
    String,
    String,
    String,
);

fn row_to_sound(row: SoundRow) -> Sound {
    Sound {
        id: row.0,
        title: row.1,
        url: row.2,
        file_name: row.3,
        account_id: row.4,
        created_at: row.5,
        updated_at: row.6,
    }
}

pub async fn get_sound(pool: &SqlitePool, sound_id: &str) -> Result<Sound, AppError> {
    let row = sqlx::query_as::<_, SoundRow>(
        "SELECT id, title, url, file_name, account_id, created_at, updated_at FROM sounds WHERE id = ?",
    )
    .bind(sound_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("no sound found".to_string()))?;

    Ok(row_to_sound(row))
}

pub async fn create_sound(pool: &SqlitePool, input: &NewSound) -> Result<Sound, AppError> {
    input.validate()?;

    let id = uuid::Uuid::new_v4().simple().to_string();

    sqlx::query(
        "INSERT INTO sounds (id, title, url, file_name, account_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&input.title)
    .bind(&input.url)
    .bind(&input.file_name)
    .bind(&input.account_id)
    .execute(pool)
    .await?;

    get_sound(pool, &id).await
}

/// Create secondary indexes. Run at startup outside development mode.
pub async fn ensure_indexes(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sounds_account_id ON sounds(account_id)")
        .execute(pool)
        .await?;
    Ok(())
}
