use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::cart::{CartTotalsRequest, CartTotalsResponse},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/totals", post(totals))
}

#[utoipa::path(
    post,
    path = "/api/cart/totals",
    request_body = CartTotalsRequest,
    responses(
        (status = 200, description = "Display totals with the 1% processing fee", body = ApiResponse<CartTotalsResponse>)
    ),
    tag = "Cart"
)]
pub async fn totals(
    State(state): State<AppState>,
    Json(payload): Json<CartTotalsRequest>,
) -> AppResult<Json<ApiResponse<CartTotalsResponse>>> {
    let response = cart_service::compute_totals(&state, payload).await?;
    Ok(Json(response))
}
