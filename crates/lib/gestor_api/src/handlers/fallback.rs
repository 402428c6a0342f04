//! Responses for requests no route handles.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::messages;

/// Unmatched route.
pub async fn not_found_handler() -> AppError {
    AppError::NotFound(messages::ROUTE_NOT_FOUND.into())
}

/// Turn a handler panic into the generic 500 body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "panic".to_string()
    };
    AppError::internal(detail).into_response()
}
