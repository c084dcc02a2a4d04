pub mod config;
pub mod error;
pub mod payload;
pub mod routes;
pub mod seed;
pub mod service;
pub mod store;
