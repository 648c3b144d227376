pub mod cart_service;
pub mod category_service;
pub mod product_service;
pub mod quotation_service;
