//! Extractors whose rejections go through [`ApiError`], so malformed bodies
//! and path segments answer with the same `{"detail": ...}` shape as every
//! other error.

use crate::errors::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);
