use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unit a product is sold by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "per_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Per {
    Pieces,
    Box,
    Pkt,
}

impl Per {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pieces" => Some(Per::Pieces),
            "box" => Some(Per::Box),
            "pkt" => Some(Per::Pkt),
            _ => None,
        }
    }
}

/// Storefront visibility flag. Products default to `off` until enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    On,
    Off,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i32,
    /// Normalized category name (lowercase, underscores).
    pub category: String,
    pub serial_number: String,
    pub productname: String,
    pub price: f64,
    pub per: Per,
    pub discount: f64,
    /// Serialized list of media data URIs.
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: ProductStatus,
    pub fast_running: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub product_type: String,
    pub created_at: DateTime<Utc>,
}

/// Checkout-time percent discount, optionally fenced by category, minimum
/// subtotal, and expiry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PromoCode {
    pub id: Uuid,
    pub code: String,
    pub percent: f64,
    pub category: Option<String>,
    pub min_amount: Option<f64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "quotation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Pending,
    Booked,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Quotation {
    pub id: i32,
    /// Human-readable reference, `QUO-<timestamp>`.
    pub quote_no: String,
    /// Assigned on booking, `ORD-<timestamp>`.
    pub order_no: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    /// Snapshot of the cart lines at submission time.
    pub lines: serde_json::Value,
    pub additional_discount: f64,
    pub net_rate: f64,
    pub you_save: f64,
    pub subtotal: f64,
    pub discounted_subtotal: f64,
    pub processing_fee: f64,
    pub total: f64,
    pub status: QuotationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
