//! In-memory stores.
//!
//! Records live behind `tokio::sync::RwLock`s; every trait call takes the
//! lock once, which gives the same per-record atomicity as the database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductStore, StoreError, StoreResult, UserStore};
use crate::models::{NewProduct, NewUser, Product, ProductPatch, User, UserWithPassword};
use crate::uuid::uuidv7;

/// Users and products held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserWithPassword>>,
    /// Kept in insertion order.
    products: RwLock<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserWithPassword>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).map(|u| u.user.clone()))
    }

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.user.email == new_user.email) {
            return Err(StoreError::Duplicate(new_user.email));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
        };
        users.insert(
            user.id,
            UserWithPassword {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );
        Ok(user)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn create_product(&self, owner: &Uuid, new_product: NewProduct) -> StoreResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: uuidv7(),
            name: new_product.name,
            price: new_product.price,
            description: new_product.description,
            user_id: *owner,
            created_at: now,
            updated_at: now,
        };
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn list_products_by_owner(&self, owner: &Uuid) -> StoreResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.user_id == *owner)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: &Uuid) -> StoreResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == *id).cloned())
    }

    async fn update_product(
        &self,
        id: &Uuid,
        patch: ProductPatch,
    ) -> StoreResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| p.id == *id).map(|product| {
            patch.apply_to(product, Utc::now());
            product.clone()
        }))
    }

    async fn delete_product(&self, id: &Uuid) -> StoreResult<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != *id);
        Ok(products.len() != before)
    }
}
