use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One cart line as submitted by the storefront. Category is only needed when
/// a category-fenced promo code is in play.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CartLine {
    pub price: f64,
    pub quantity: i64,
    pub discount: f64,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartTotalsRequest {
    pub items: Vec<CartLine>,
    pub additional_discount: Option<f64>,
    pub promo_code: Option<String>,
}

/// Monetary fields are pre-formatted to two decimal places.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartTotalsResponse {
    pub net_rate: String,
    pub you_save: String,
    pub subtotal: String,
    pub discounted_subtotal: String,
    pub processing_fee: String,
    pub total: String,
    /// Promo actually applied, if any survived validation.
    pub applied_promo: Option<String>,
    /// Set when a requested promo failed validation and was cleared.
    pub promo_error: Option<String>,
}
