//! fraudgate HTTP server
//!
//! Exposes charge decisions and rule authoring over a JSON REST API.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;

pub use config::ServerConfig;
pub use error::ServerError;
