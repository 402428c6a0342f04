//! # gestor_core
//!
//! Core domain logic for Gestor de Productos: users, products, password
//! hashing, bearer tokens and the persistence layer behind them.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
