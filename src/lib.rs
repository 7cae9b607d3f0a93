pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
