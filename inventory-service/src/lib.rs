pub mod api;
pub mod config;
pub mod flash;
pub mod memory;
pub mod models;
pub mod schema;
pub mod store;
pub mod views;
pub mod workflow;
