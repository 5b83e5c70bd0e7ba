//! Request extractors.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor whose rejections render as [`ApiError`].
///
/// A missing field, a wrong type or malformed JSON becomes a 400 with the
/// usual `{"error": {...}}` body instead of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
