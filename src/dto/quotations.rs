use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::cart::CartLine;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuotationRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub items: Vec<CartLine>,
    pub additional_discount: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuotationRequest {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub items: Option<Vec<CartLine>>,
    pub additional_discount: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingConfirmed {
    pub order_no: String,
}
