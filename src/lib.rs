pub mod audit;
pub mod cache;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod media;
pub mod models;
pub mod pricing;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
