//! Domain models.
//!
//! These are internal domain models, distinct from the wire models in
//! `gestor_api::models` (which carry `_id`, camelCase timestamps etc.).

pub mod auth;
pub mod product;
pub mod user;

pub use auth::TokenClaims;
pub use product::{NewProduct, Product, ProductPatch};
pub use user::{NewUser, User, UserWithPassword};
