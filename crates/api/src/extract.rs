//! Extractors whose rejections use the JSON error envelope.

use axum::extract::FromRequestParts;

use crate::error::AppError;

/// [`axum::extract::Path`] that rejects malformed segments with a JSON 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
