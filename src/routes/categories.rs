use axum::{
    extract::{multipart::Multipart, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    routes::{next_field, read_field, FieldValue},
    state::AppState,
    types::{Category, UploadedFile},
    uploads,
};

/// GET /api/categories — all categories in insertion order.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories: Vec<Category> =
        sqlx::query_as("SELECT id, name, image FROM categories ORDER BY id")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(categories))
}

/// POST /api/categories — multipart form `{name, image?}`.
///
/// The image, when present, is stored before the INSERT so the row carries
/// its relative path. A duplicate name trips the UNIQUE constraint and comes
/// back as Conflict.
pub async fn create_category(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Category>)> {
    let mut name: Option<String> = None;
    let mut image: Option<UploadedFile> = None;

    while let Some(field) = next_field(&mut multipart).await? {
        match read_field(field).await? {
            (n, FieldValue::Text(v)) if n == "name" => name = Some(v),
            (n, FieldValue::File(f)) if n == "image" => {
                // Browsers send an empty filename for an unselected file input.
                if !f.original_filename.is_empty() {
                    image = Some(f);
                }
            }
            _ => {}
        }
    }

    let name = match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => return Err(AppError::BadRequest("name is required".into())),
    };

    let image_path = match &image {
        Some(file) => Some(
            uploads::store_upload(
                &state.uploads_dir(),
                "category",
                &name,
                &file.original_filename,
                &file.bytes,
            )
            .await?,
        ),
        None => None,
    };

    let id = sqlx::query("INSERT INTO categories (name, image) VALUES (?1, ?2)")
        .bind(&name)
        .bind(&image_path)
        .execute(&state.db)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict(format!("Category '{}' already exists", name)),
            other => other,
        })?
        .last_insert_rowid();

    Ok((StatusCode::CREATED, Json(Category { id, name, image: image_path })))
}
