use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, put},
};

use crate::{
    dto::products::{
        CreateProductRequest, CreatedProduct, FastRunningToggled, ProductList, StatusToggled,
        UpdateProductRequest,
    },
    error::AppResult,
    models::Product,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{category}/{id}", put(update_product))
        .route("/{category}/{id}", delete(delete_product))
        .route("/{category}/{id}/fast-running", patch(toggle_fast_running))
        .route("/{category}/{id}/status", patch(toggle_status))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products across categories", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let response = product_service::list_products(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<CreatedProduct>),
        (status = 400, description = "Validation or duplicate error"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedProduct>>)> {
    let response = product_service::add_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{category}/{id}",
    params(
        ("category" = String, Path, description = "Category name"),
        ("id" = i32, Path, description = "Product ID"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
        (status = 400, description = "Validation or duplicate error"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i32)>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let response = product_service::update_product(&state, &category, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/products/{category}/{id}",
    params(
        ("category" = String, Path, description = "Category name"),
        ("id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Deleted product"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i32)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = product_service::delete_product(&state, &category, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/products/{category}/{id}/fast-running",
    params(
        ("category" = String, Path, description = "Category name"),
        ("id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "New fast-running value", body = ApiResponse<FastRunningToggled>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn toggle_fast_running(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i32)>,
) -> AppResult<Json<ApiResponse<FastRunningToggled>>> {
    let response = product_service::toggle_fast_running(&state, &category, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/products/{category}/{id}/status",
    params(
        ("category" = String, Path, description = "Category name"),
        ("id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "New status value", body = ApiResponse<StatusToggled>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn toggle_status(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i32)>,
) -> AppResult<Json<ApiResponse<StatusToggled>>> {
    let response = product_service::toggle_status(&state, &category, id).await?;
    Ok(Json(response))
}
