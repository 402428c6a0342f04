//! Credential Store and Product Store.
//!
//! Handlers talk to storage only through the [`UserStore`] and
//! [`ProductStore`] traits. [`PgStore`] is the durable implementation;
//! [`MemoryStore`] backs tests and `--store memory` runs.
//!
//! Each call is a single atomic operation on one record. There is no
//! optimistic concurrency on products: concurrent updates are last-write-wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewProduct, NewUser, Product, ProductPatch, User, UserWithPassword};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was violated (e.g. email already registered).
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persisted user credentials.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user (with password hash) by exact, case-sensitive email.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserWithPassword>>;

    /// Look up the public fields of a user by id.
    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<User>>;

    /// Insert a user. Fails with [`StoreError::Duplicate`] if the email is taken.
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User>;
}

/// Persisted products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a product owned by `owner`.
    async fn create_product(&self, owner: &Uuid, new_product: NewProduct) -> StoreResult<Product>;

    /// All products owned by `owner`, oldest first.
    async fn list_products_by_owner(&self, owner: &Uuid) -> StoreResult<Vec<Product>>;

    /// Fetch a product by id regardless of owner.
    async fn get_product(&self, id: &Uuid) -> StoreResult<Option<Product>>;

    /// Merge `patch` onto the stored product. Returns `None` if absent.
    async fn update_product(&self, id: &Uuid, patch: ProductPatch)
    -> StoreResult<Option<Product>>;

    /// Delete a product. Returns `false` if it did not exist.
    async fn delete_product(&self, id: &Uuid) -> StoreResult<bool>;
}
