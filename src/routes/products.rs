use axum::{
    extract::{multipart::Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult, OptionExt},
    routes::{next_field, read_field, FieldValue},
    state::AppState,
    types::{Product, ProductForm, ValidatedProductForm},
    uploads,
};

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.price, p.stock, p.description, p.image, \
     p.category_id, c.name AS category_name";

/// GET /api/products — all products with resolved category names.
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products p \
         LEFT JOIN categories c ON c.id = p.category_id ORDER BY p.id"
    );
    let products: Vec<Product> = sqlx::query_as(&sql).fetch_all(&state.db).await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    Ok(Json(fetch_product(&state, id).await?))
}

async fn fetch_product(state: &AppState, id: i64) -> AppResult<Product> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products p \
         LEFT JOIN categories c ON c.id = p.category_id WHERE p.id = ?1"
    );
    let product: Option<Product> =
        sqlx::query_as(&sql).bind(id).fetch_optional(&state.db).await?;
    product.ok_or_not_found("Product")
}

async fn parse_product_form(multipart: &mut Multipart) -> AppResult<ValidatedProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = next_field(multipart).await? {
        match read_field(field).await? {
            (n, FieldValue::Text(v)) => match n.as_str() {
                "name" => form.name = Some(v),
                "price" => form.price = Some(v),
                "stock" => form.stock = Some(v),
                "description" => form.description = Some(v),
                "category_id" => form.category_id = Some(v),
                _ => {}
            },
            (n, FieldValue::File(f)) if n == "image" => {
                if !f.original_filename.is_empty() {
                    form.image = Some(f);
                }
            }
            _ => {}
        }
    }

    form.into_validated()
}

/// POST /api/products — multipart form, numeric fields arrive as text.
///
/// Validation happens before anything is persisted: a malformed price or
/// stock leaves neither a row nor an uploaded file behind.
pub async fn create_product(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Product>)> {
    let form = parse_product_form(&mut multipart).await?;

    let image_path = store_form_image(&state, &form).await?;

    let id = sqlx::query(
        "INSERT INTO products (name, price, stock, description, image, category_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&form.name)
    .bind(form.price)
    .bind(form.stock)
    .bind(&form.description)
    .bind(&image_path)
    .bind(form.category_id)
    .execute(&state.db)
    .await?
    .last_insert_rowid();

    Ok((StatusCode::CREATED, Json(fetch_product(&state, id).await?)))
}

/// PUT /api/products/{id} — full overwrite, not a partial patch.
///
/// Every scalar column is rewritten from the form: an absent description
/// resets to the empty string and an absent category_id becomes null. Only
/// the image survives an update that does not supply a replacement.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<Product>> {
    let existing = fetch_product(&state, id).await?;
    let form = parse_product_form(&mut multipart).await?;

    let image_path = match store_form_image(&state, &form).await? {
        Some(new_path) => Some(new_path),
        None => existing.image,
    };

    sqlx::query(
        "UPDATE products SET name = ?1, price = ?2, stock = ?3, description = ?4, \
         image = ?5, category_id = ?6 WHERE id = ?7",
    )
    .bind(&form.name)
    .bind(form.price)
    .bind(form.stock)
    .bind(&form.description)
    .bind(&image_path)
    .bind(form.category_id)
    .bind(id)
    .execute(&state.db)
    .await?;

    Ok(Json(fetch_product(&state, id).await?))
}

/// DELETE /api/products/{id} — physical deletion.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let affected = sqlx::query("DELETE FROM products WHERE id = ?1")
        .bind(id)
        .execute(&state.db)
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(AppError::NotFound("Product not found".into()));
    }
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

async fn store_form_image(
    state: &AppState,
    form: &ValidatedProductForm,
) -> AppResult<Option<String>> {
    match &form.image {
        Some(file) => Ok(Some(
            uploads::store_upload(
                &state.uploads_dir(),
                "product",
                &form.name,
                &file.original_filename,
                &file.bytes,
            )
            .await?,
        )),
        None => Ok(None),
    }
}
