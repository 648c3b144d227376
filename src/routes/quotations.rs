use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::quotations::{BookingConfirmed, CreateQuotationRequest, UpdateQuotationRequest},
    error::AppResult,
    models::Quotation,
    response::ApiResponse,
    services::quotation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quotation))
        .route("/{quote_no}", get(get_quotation).put(update_quotation))
        .route("/{quote_no}/book", post(book_quotation))
        .route("/{quote_no}/cancel", post(cancel_quotation))
}

#[utoipa::path(
    post,
    path = "/api/quotations",
    request_body = CreateQuotationRequest,
    responses(
        (status = 201, description = "Quotation created", body = ApiResponse<Quotation>),
        (status = 400, description = "Validation error"),
    ),
    tag = "Quotations"
)]
pub async fn create_quotation(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuotationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Quotation>>)> {
    let response = quotation_service::create_quotation(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/quotations/{quote_no}",
    params(("quote_no" = String, Path, description = "Quotation reference")),
    responses(
        (status = 200, description = "Quotation", body = ApiResponse<Quotation>),
        (status = 404, description = "Quotation not found"),
    ),
    tag = "Quotations"
)]
pub async fn get_quotation(
    State(state): State<AppState>,
    Path(quote_no): Path<String>,
) -> AppResult<Json<ApiResponse<Quotation>>> {
    let response = quotation_service::get_quotation(&state, &quote_no).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/quotations/{quote_no}",
    params(("quote_no" = String, Path, description = "Quotation reference")),
    request_body = UpdateQuotationRequest,
    responses(
        (status = 200, description = "Updated quotation", body = ApiResponse<Quotation>),
        (status = 400, description = "Quotation no longer pending"),
        (status = 404, description = "Quotation not found"),
    ),
    tag = "Quotations"
)]
pub async fn update_quotation(
    State(state): State<AppState>,
    Path(quote_no): Path<String>,
    Json(payload): Json<UpdateQuotationRequest>,
) -> AppResult<Json<ApiResponse<Quotation>>> {
    let response = quotation_service::update_quotation(&state, &quote_no, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/quotations/{quote_no}/book",
    params(("quote_no" = String, Path, description = "Quotation reference")),
    responses(
        (status = 200, description = "Booked; order reference assigned", body = ApiResponse<BookingConfirmed>),
        (status = 400, description = "Quotation no longer pending"),
        (status = 404, description = "Quotation not found"),
    ),
    tag = "Quotations"
)]
pub async fn book_quotation(
    State(state): State<AppState>,
    Path(quote_no): Path<String>,
) -> AppResult<Json<ApiResponse<BookingConfirmed>>> {
    let response = quotation_service::book_quotation(&state, &quote_no).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/quotations/{quote_no}/cancel",
    params(("quote_no" = String, Path, description = "Quotation reference")),
    responses(
        (status = 200, description = "Cancelled"),
        (status = 400, description = "Quotation no longer pending"),
        (status = 404, description = "Quotation not found"),
    ),
    tag = "Quotations"
)]
pub async fn cancel_quotation(
    State(state): State<AppState>,
    Path(quote_no): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = quotation_service::cancel_quotation(&state, &quote_no).await?;
    Ok(Json(response))
}
