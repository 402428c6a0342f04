//! PostgreSQL-backed stores.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ProductStore, StoreError, StoreResult, UserStore};
use crate::models::{NewProduct, NewUser, Product, ProductPatch, User, UserWithPassword};
use crate::uuid::uuidv7;

const PRODUCT_COLUMNS: &str = "id, name, price, description, user_id, created_at, updated_at";

/// Stores backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserWithPassword>> {
        let row = sqlx::query_as::<_, (Uuid, String, String, String)>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id, name, email, password_hash)| UserWithPassword {
            user: User { id, name, email },
            password_hash,
        }))
    }

    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, name, email",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Duplicate(new_user.email.clone())
            }
            other => StoreError::Db(other),
        })
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn create_product(&self, owner: &Uuid, new_product: NewProduct) -> StoreResult<Product> {
        let sql = format!(
            "INSERT INTO products (id, name, price, description, user_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(uuidv7())
            .bind(&new_product.name)
            .bind(new_product.price)
            .bind(&new_product.description)
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;
        Ok(product)
    }

    async fn list_products_by_owner(&self, owner: &Uuid) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE user_id = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, Product>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_product(&self, id: &Uuid) -> StoreResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_product(
        &self,
        id: &Uuid,
        patch: ProductPatch,
    ) -> StoreResult<Option<Product>> {
        let sql = format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.price)
            .bind(patch.description)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_product(&self, id: &Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
