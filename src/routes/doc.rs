use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{CartLine, CartTotalsRequest, CartTotalsResponse},
        categories::{CategoryList, CategoryName, CreateCategoryRequest},
        products::{
            CreateProductRequest, CreatedProduct, FastRunningToggled, ProductList, StatusToggled,
            UpdateProductRequest,
        },
        quotations::{BookingConfirmed, CreateQuotationRequest, UpdateQuotationRequest},
    },
    models::{Category, Per, Product, ProductStatus, PromoCode, Quotation, QuotationStatus},
    response::{ApiResponse, Meta},
    routes::{cart, categories, health, products, quotations},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::toggle_fast_running,
        products::toggle_status,
        categories::list_categories,
        categories::create_category,
        cart::totals,
        quotations::create_quotation,
        quotations::get_quotation,
        quotations::update_quotation,
        quotations::book_quotation,
        quotations::cancel_quotation,
    ),
    components(
        schemas(
            Product,
            Per,
            ProductStatus,
            Category,
            PromoCode,
            Quotation,
            QuotationStatus,
            CreateProductRequest,
            UpdateProductRequest,
            CreatedProduct,
            FastRunningToggled,
            StatusToggled,
            ProductList,
            CreateCategoryRequest,
            CategoryName,
            CategoryList,
            CartLine,
            CartTotalsRequest,
            CartTotalsResponse,
            CreateQuotationRequest,
            UpdateQuotationRequest,
            BookingConfirmed,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CategoryList>,
            ApiResponse<CartTotalsResponse>,
            ApiResponse<Quotation>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Per-category product inventory"),
        (name = "Product types", description = "Category management"),
        (name = "Cart", description = "Storefront cart totals"),
        (name = "Quotations", description = "Quotation and booking lifecycle"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
