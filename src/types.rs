use serde::{Deserialize, Serialize};

/// A named grouping for products, optionally illustrated with an image.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Relative path under the uploads directory, null when no image was supplied.
    pub image: Option<String>,
}

/// A sellable item. `category_name` is resolved at query time via LEFT JOIN
/// and is null for uncategorized products and dangling category references.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
    pub image: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

/// A user row. The password hash never serializes; responses use [`UserDto`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2id PHC-format hash, never the plaintext.
    pub password: String,
}

/// The password-free representation sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self { id: u.id, username: u.username, email: u.email }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `identifier` is matched against the email column only. The asymmetric
/// field name is part of the wire contract.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserDto,
}

/// An uploaded file pulled out of a multipart field.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_filename: String,
    pub bytes: Vec<u8>,
}

/// Accumulated multipart fields for product create/update. Scalar fields
/// arrive as text; numeric parsing and required-field checks happen in
/// [`ProductForm::into_validated`].
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub image: Option<UploadedFile>,
}

/// The parsed, validated form: what actually gets written to the row.
#[derive(Debug)]
pub struct ValidatedProductForm {
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
    pub category_id: Option<i64>,
    pub image: Option<UploadedFile>,
}

impl ProductForm {
    /// Parses textual price/stock/category_id and applies the full-overwrite
    /// defaults: absent description becomes the empty string, absent or empty
    /// category_id becomes null.
    pub fn into_validated(self) -> crate::error::AppResult<ValidatedProductForm> {
        use crate::error::AppError;

        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(AppError::BadRequest("name is required".into())),
        };
        let price: f64 = self
            .price
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("price is required".to_string()))?
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid price: {}", self.price.as_deref().unwrap_or(""))))?;
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::BadRequest(format!("price must be non-negative, got {}", price)));
        }
        let stock: i64 = self
            .stock
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("stock is required".to_string()))?
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid stock: {}", self.stock.as_deref().unwrap_or(""))))?;
        if stock < 0 {
            return Err(AppError::BadRequest(format!("stock must be non-negative, got {}", stock)));
        }
        // Stored as-is, not validated against existing categories.
        let category_id = match self.category_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| AppError::BadRequest(format!("invalid category_id: {}", raw)))?,
            ),
        };

        Ok(ValidatedProductForm {
            name,
            price,
            stock,
            description: self.description.unwrap_or_default(),
            category_id,
            image: self.image,
        })
    }
}
