//! Key-Delivery HTTP API Service.
//!
//! This crate provides the HTTP API for the key-delivery service, including:
//!
//! - Admin login
//! - Credential inventory and redemption code management
//! - Public code redemption
//!
//! # Authentication
//!
//! Admins exchange the shared password for a short-lived bearer token at
//! `POST /api/admin/verify`. Redemption is public.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Health handler has nothing to await

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
