//! Extractors whose rejections render as API errors
//!
//! The plain axum extractors answer malformed input with a text body, these
//! wrap them so the client always gets the error envelope

use axum::extract::{FromRequest, FromRequestParts, Path, Query};
use common::Error;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(Error))]
pub struct ApiPath<T>(pub T);
