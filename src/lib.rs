//! # Kinosaal Backend Library
//!
//! Core library for Kinosaal, a REST backend for a movie-review community:
//! user accounts with token authentication, movie records, reviews with image
//! attachments, review likes, movie reactions and a follow graph.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: HTTP server, routing and request extraction
//! - **SQLx**: Asynchronous database operations with SQLite
//! - **Tokio**: Async runtime
//! - **Serde**: Serialization/deserialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`auth`]: Password hashing, access tokens and the caller extractor
//! - [`config`]: Application configuration management
//! - [`db`]: Database schema initialization
//! - [`error`]: Centralized error handling and HTTP error responses
//! - [`models`]: Data-access functions over the connection pool
//! - [`routes`]: HTTP API endpoint handlers
//! - [`state`]: Shared application state
//! - [`types`]: Data transfer objects and shared type definitions
//! - [`upload`]: Image upload storage for review attachments

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod types;
pub mod upload;

#[cfg(test)]
mod tests;
