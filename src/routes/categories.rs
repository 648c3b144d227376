use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::categories::{CategoryList, CreateCategoryRequest},
    error::AppResult,
    models::Category,
    response::ApiResponse,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories).post(create_category))
}

#[utoipa::path(
    get,
    path = "/api/product-types",
    responses(
        (status = 200, description = "Known product types", body = ApiResponse<CategoryList>)
    ),
    tag = "Product types"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let response = category_service::list_categories(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/product-types",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Product type created", body = ApiResponse<Category>),
        (status = 400, description = "Missing or duplicate product type"),
    ),
    tag = "Product types"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let response = category_service::add_category(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
