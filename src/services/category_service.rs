use crate::{
    audit::log_audit,
    dto::categories::{CategoryList, CategoryName, CreateCategoryRequest},
    error::{AppError, AppResult},
    models::Category,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Canonical form of a category name: trimmed, lowercased, spaces replaced
/// with underscores. This is the value stored and matched everywhere.
pub fn normalize_category(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

pub async fn add_category(
    state: &AppState,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    if payload.product_type.trim().is_empty() {
        return Err(AppError::BadRequest("product_type is required".to_string()));
    }
    let name = normalize_category(&payload.product_type);

    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (product_type) VALUES ($1) RETURNING *",
    )
    .bind(&name)
    .fetch_one(&state.pool)
    .await
    .map_err(|err| AppError::from_db(err, "product type already exists"))?;

    state.categories.invalidate().await;

    if let Err(err) = log_audit(
        &state.pool,
        "category_create",
        Some("categories"),
        Some(serde_json::json!({ "product_type": name })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product type created",
        category,
        Some(Meta::empty()),
    ))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let names = state.categories.get_or_refresh(&state.pool).await?;
    let total = names.len() as i64;
    let items = names
        .into_iter()
        .map(|product_type| CategoryName { product_type })
        .collect();

    Ok(ApiResponse::success(
        "Product types",
        CategoryList { items },
        Some(Meta::total(total)),
    ))
}

/// Register a category if it does not exist yet. Returns true when a new row
/// was created, in which case the cache has been invalidated.
pub async fn ensure_category(state: &AppState, normalized: &str) -> AppResult<bool> {
    let result =
        sqlx::query("INSERT INTO categories (product_type) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(normalized)
            .execute(&state.pool)
            .await?;

    let created = result.rows_affected() > 0;
    if created {
        state.categories.invalidate().await;
        tracing::info!(category = %normalized, "category auto-registered");
    }
    Ok(created)
}
