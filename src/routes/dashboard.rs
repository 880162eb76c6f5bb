use axum::{extract::State, Json};
use serde_json::{json, Value};
use sqlx::Row;

use crate::{error::AppResult, state::AppState};

/// GET /api/dashboard/products-count — total product row count, no filters.
pub async fn products_count(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM products").fetch_one(&state.db).await?;
    let count: i64 = row.get("count");
    Ok(Json(json!({ "count": count })))
}
