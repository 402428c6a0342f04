//! Request handlers.

pub mod auth;
pub mod fallback;
pub mod products;
