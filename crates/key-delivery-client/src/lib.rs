//! Key-Delivery Client SDK.
//!
//! This crate provides a client library for storefronts and admin tools to
//! interact with the key-delivery API.
//!
//! # Example
//!
//! ```no_run
//! use key_delivery_client::KeyDeliveryClient;
//!
//! # async fn example() -> Result<(), key_delivery_client::ClientError> {
//! let client = KeyDeliveryClient::new("http://key-delivery:8080")?;
//!
//! // Stock inventory as an admin
//! let admin = client.login("admin-password").await?;
//! admin.create_account("alice", "pw1").await?;
//! admin.create_key("A1").await?;
//!
//! // Redeem as a customer
//! let response = client.redeem("A1").await?;
//! if let Some(account) = response.account {
//!     println!("{} / {}", account.username, account.password);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{AdminSession, ClientOptions, KeyDeliveryClient};
pub use error::ClientError;
pub use types::*;
