use crate::{
    audit::log_audit,
    dto::products::{
        CreateProductRequest, CreatedProduct, FastRunningToggled, ProductList, StatusToggled,
        UpdateProductRequest,
    },
    error::{AppError, AppResult},
    media,
    models::{Per, Product, ProductStatus},
    response::{ApiResponse, Meta},
    services::category_service::{ensure_category, normalize_category},
    state::AppState,
};

const DUPLICATE_MESSAGE: &str = "serial_number or productname already exists in this category";

fn validate_per(value: &str) -> AppResult<Per> {
    Per::parse(value)
        .ok_or_else(|| AppError::BadRequest("per must be one of pieces, box, pkt".to_string()))
}

fn validate_discount(value: f64) -> AppResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::BadRequest(
            "discount must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::BadRequest(
            "price must be zero or greater".to_string(),
        ));
    }
    Ok(())
}

fn serialize_images(images: &[String]) -> AppResult<String> {
    media::validate_media(images).map_err(AppError::BadRequest)?;
    serde_json::to_string(images).map_err(|err| AppError::Internal(err.into()))
}

pub async fn add_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<CreatedProduct>> {
    for (field, value) in [
        ("serial_number", &payload.serial_number),
        ("productname", &payload.productname),
        ("product_type", &payload.product_type),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }
    validate_price(payload.price)?;
    validate_discount(payload.discount)?;
    let per = validate_per(&payload.per)?;
    let image = match payload.images.as_deref() {
        Some(images) => Some(serialize_images(images)?),
        None => None,
    };

    let category = normalize_category(&payload.product_type);
    ensure_category(state, &category).await?;

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO products
            (category, serial_number, productname, price, per, discount, image, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(&category)
    .bind(payload.serial_number.trim())
    .bind(payload.productname.trim())
    .bind(payload.price)
    .bind(per)
    .bind(payload.discount)
    .bind(image)
    .bind(payload.description.as_deref())
    .fetch_one(&state.pool)
    .await
    .map_err(|err| AppError::from_db(err, DUPLICATE_MESSAGE))?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "id": id, "category": category })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product created",
        CreatedProduct { id },
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    category: &str,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let category = normalize_category(category);
    let existing =
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE category = $1 AND id = $2")
            .bind(&category)
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    // Only supplied fields replace existing values.
    let serial_number = payload.serial_number.unwrap_or(existing.serial_number);
    let productname = payload.productname.unwrap_or(existing.productname);
    let price = payload.price.unwrap_or(existing.price);
    let per = match payload.per.as_deref() {
        Some(value) => validate_per(value)?,
        None => existing.per,
    };
    let discount = payload.discount.unwrap_or(existing.discount);
    let description = payload.description.or(existing.description);
    let image = match payload.images.as_deref() {
        Some(images) => Some(serialize_images(images)?),
        None => existing.image,
    };
    let status = payload.status.unwrap_or(existing.status);

    validate_price(price)?;
    validate_discount(discount)?;

    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET serial_number = $3, productname = $4, price = $5, per = $6,
            discount = $7, image = $8, description = $9, status = $10
        WHERE category = $1 AND id = $2
        RETURNING *
        "#,
    )
    .bind(&category)
    .bind(id)
    .bind(&serial_number)
    .bind(&productname)
    .bind(price)
    .bind(per)
    .bind(discount)
    .bind(image)
    .bind(description)
    .bind(status)
    .fetch_one(&state.pool)
    .await
    .map_err(|err| AppError::from_db(err, DUPLICATE_MESSAGE))?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "id": id, "category": category })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

/// Flatten every category's products into one sequence: category cache order
/// first, insertion order within a category.
pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let categories = state.categories.get_or_refresh(&state.pool).await?;

    let mut items: Vec<Product> = Vec::new();
    for category in &categories {
        let mut rows = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE category = $1 ORDER BY id",
        )
        .bind(category)
        .fetch_all(&state.pool)
        .await?;
        items.append(&mut rows);
    }

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn delete_product(
    state: &AppState,
    category: &str,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let category = normalize_category(category);
    let result = sqlx::query("DELETE FROM products WHERE category = $1 AND id = $2")
        .bind(&category)
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "id": id, "category": category })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Atomic flip, so concurrent toggles cannot lose an update.
pub async fn toggle_fast_running(
    state: &AppState,
    category: &str,
    id: i32,
) -> AppResult<ApiResponse<FastRunningToggled>> {
    let category = normalize_category(category);
    let row: Option<(bool,)> = sqlx::query_as(
        r#"
        UPDATE products
        SET fast_running = NOT fast_running
        WHERE category = $1 AND id = $2
        RETURNING fast_running
        "#,
    )
    .bind(&category)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?;

    let fast_running = match row {
        Some((value,)) => value,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "Fast running toggled",
        FastRunningToggled { fast_running },
        Some(Meta::empty()),
    ))
}

pub async fn toggle_status(
    state: &AppState,
    category: &str,
    id: i32,
) -> AppResult<ApiResponse<StatusToggled>> {
    let category = normalize_category(category);
    let row: Option<(ProductStatus,)> = sqlx::query_as(
        r#"
        UPDATE products
        SET status = CASE WHEN status = 'on' THEN 'off'::product_status
                          ELSE 'on'::product_status END
        WHERE category = $1 AND id = $2
        RETURNING status
        "#,
    )
    .bind(&category)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?;

    let status = match row {
        Some((value,)) => value,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "Status toggled",
        StatusToggled { status },
        Some(Meta::empty()),
    ))
}
