use chrono::Utc;

use crate::{
    dto::cart::{CartLine, CartTotalsRequest, CartTotalsResponse},
    error::AppResult,
    models::PromoCode,
    pricing::{self, CartTotals, DISPLAY_FEE_RATE, LineItem},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Clamp raw storefront input into the ranges the pricing engine assumes.
fn clamp_lines(lines: &[CartLine]) -> Vec<LineItem> {
    lines
        .iter()
        .map(|line| LineItem {
            price: line.price.max(0.0),
            quantity: line.quantity.max(0),
            discount: line.discount.clamp(0.0, 100.0),
        })
        .collect()
}

/// Display totals for the storefront cart. A failing promo code is cleared
/// (totals fall back to the plain additional discount) and the failure reason
/// travels back in `promo_error`.
pub async fn compute_totals(
    state: &AppState,
    payload: CartTotalsRequest,
) -> AppResult<ApiResponse<CartTotalsResponse>> {
    let items = clamp_lines(&payload.items);
    let additional = payload
        .additional_discount
        .unwrap_or(0.0)
        .clamp(0.0, 100.0);

    let base = CartTotals::compute(&items, additional, DISPLAY_FEE_RATE);

    let mut applied_promo = None;
    let mut promo_error = None;
    let mut effective_additional = additional;

    if let Some(code) = payload.promo_code.as_deref().filter(|c| !c.is_empty()) {
        let promo: Option<PromoCode> =
            sqlx::query_as("SELECT * FROM promo_codes WHERE code = $1")
                .bind(code)
                .fetch_optional(&state.pool)
                .await?;

        match promo {
            None => promo_error = Some("invalid promo code".to_string()),
            Some(promo) => {
                let cart_categories: Vec<String> = payload
                    .items
                    .iter()
                    .filter_map(|line| line.category.clone())
                    .collect();
                match pricing::check_promo(&promo, base.subtotal, &cart_categories, Utc::now()) {
                    Ok(()) => {
                        effective_additional =
                            (additional + promo.percent).clamp(0.0, 100.0);
                        applied_promo = Some(promo.code);
                    }
                    Err(err) => promo_error = Some(err.to_string()),
                }
            }
        }
    }

    let totals = if applied_promo.is_some() {
        CartTotals::compute(&items, effective_additional, DISPLAY_FEE_RATE)
    } else {
        base
    };

    let data = CartTotalsResponse {
        net_rate: pricing::format_amount(totals.net_rate),
        you_save: pricing::format_amount(totals.you_save),
        subtotal: pricing::format_amount(totals.subtotal),
        discounted_subtotal: pricing::format_amount(totals.discounted_subtotal),
        processing_fee: pricing::format_amount(totals.processing_fee),
        total: pricing::format_amount(totals.total),
        applied_promo,
        promo_error,
    };

    Ok(ApiResponse::success("Cart totals", data, Some(Meta::empty())))
}
