//! # Warenkorb Backend Library
//!
//! Warenkorb is a small e-commerce catalog backend: it authenticates users,
//! manages product categories and products (including image uploads), and
//! serves a product count for a dashboard.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: HTTP server, routing, and multipart form parsing
//! - **SQLx**: Asynchronous database operations with SQLite
//! - **Tokio**: Async runtime
//! - **Serde**: Serialization/deserialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`config`]: Application configuration management
//! - [`db`]: Database schema initialization
//! - [`error`]: Centralized error handling and HTTP error responses
//! - [`password`]: Password hashing and verification (argon2id)
//! - [`routes`]: HTTP API endpoint handlers
//! - [`state`]: Shared application state
//! - [`types`]: Data transfer objects and row types
//! - [`uploads`]: Image upload storage

pub mod config;
pub mod db;
pub mod error;
pub mod password;
pub mod router;
pub mod routes;
pub mod state;
pub mod types;
pub mod uploads;

#[cfg(test)]
mod tests;
