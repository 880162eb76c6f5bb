//! HTTP route handlers for the Warenkorb API.
//!
//! - `auth`: registration and login
//! - `categories`: category listing and creation
//! - `products`: product CRUD
//! - `dashboard`: product count for the dashboard
//! - `health`: health check and version endpoints

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod products;

use axum::extract::multipart::Multipart;

use crate::error::{AppError, AppResult};
use crate::types::UploadedFile;

/// Reads one multipart field into either a text value or an uploaded file.
///
/// Fields carrying a filename are treated as file uploads; everything else
/// is read as UTF-8 text. Shared by the category and product handlers.
pub(crate) async fn read_field(
    field: axum::extract::multipart::Field<'_>,
) -> AppResult<(String, FieldValue)> {
    let name = field
        .name()
        .ok_or_else(|| AppError::BadRequest("multipart field without a name".to_string()))?
        .to_string();

    if let Some(filename) = field.file_name() {
        let original_filename = filename.to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {}", e)))?;
        Ok((name, FieldValue::File(UploadedFile { original_filename, bytes: bytes.to_vec() })))
    } else {
        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid text field: {}", e)))?;
        Ok((name, FieldValue::Text(text)))
    }
}

pub(crate) enum FieldValue {
    Text(String),
    File(UploadedFile),
}

/// Drains a multipart stream, returning the next field or a BadRequest for
/// transport-level multipart errors.
pub(crate) async fn next_field(
    multipart: &mut Multipart,
) -> AppResult<Option<axum::extract::multipart::Field<'_>>> {
    multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {}", e)))
}
