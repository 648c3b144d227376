use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod categories;
pub mod doc;
pub mod health;
pub mod products;
pub mod quotations;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/product-types", categories::router())
        .nest("/cart", cart::router())
        .nest("/quotations", quotations::router())
}
