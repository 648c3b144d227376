pub mod cart;
pub mod categories;
pub mod products;
pub mod quotations;
