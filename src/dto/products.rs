use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Product, ProductStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub serial_number: String,
    pub productname: String,
    pub price: f64,
    /// One of `pieces`, `box`, `pkt`; validated server-side.
    pub per: String,
    pub discount: f64,
    pub product_type: String,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub serial_number: Option<String>,
    pub productname: Option<String>,
    pub price: Option<f64>,
    pub per: Option<String>,
    pub discount: Option<f64>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub status: Option<ProductStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedProduct {
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FastRunningToggled {
    pub fast_running: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusToggled {
    pub status: ProductStatus,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
