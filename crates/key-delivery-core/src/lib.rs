//! Core types for key-delivery.
//!
//! This crate provides the record types shared by the store, the HTTP service
//! and the client:
//!
//! - **Identifiers**: `CredentialId`, `CodeId`
//! - **Inventory**: `Credential`, `RedemptionCode`
//! - **Redemption**: `RedemptionOutcome`, `RedemptionFailure`, `DeliveredCredential`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod code;
pub mod credential;
pub mod error;
pub mod ids;
pub mod redemption;

pub use code::{normalize_code_value, RedemptionCode};
pub use credential::{Credential, DeliveredCredential};
pub use error::{CoreError, Result};
pub use ids::{CodeId, CredentialId, IdError};
pub use redemption::{RedemptionFailure, RedemptionOutcome};
