//! Product service: CRUD with ownership checks on mutation.

use gestor_core::models::User;
use gestor_core::store::ProductStore;
use gestor_core::uuid::parse_id;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::messages;
use crate::models::{
    CreateProductRequest, MessageResponse, ProductResponse, UpdateProductRequest,
};
use crate::validation::{validate_new_product, validate_product_patch};

fn not_found() -> AppError {
    AppError::NotFound(messages::PRODUCT_NOT_FOUND.into())
}

/// Malformed ids cannot name a stored product, so they are reported as absent.
fn product_id(raw: &str) -> AppResult<Uuid> {
    parse_id(raw).ok_or_else(not_found)
}

/// Create a product owned by `caller`.
pub async fn create(
    products: &dyn ProductStore,
    caller: &User,
    req: CreateProductRequest,
) -> AppResult<ProductResponse> {
    let new_product = validate_new_product(req)?;
    let product = products
        .create_product(&caller.id, new_product)
        .await
        .map_err(|e| AppError::from(e).internal_as_bad_request(messages::PRODUCT_NOT_SAVED))?;
    info!(product_id = %product.id, user_id = %caller.id, "product created");
    Ok(product.into())
}

/// List the caller's own products.
pub async fn list_mine(
    products: &dyn ProductStore,
    caller: &User,
) -> AppResult<Vec<ProductResponse>> {
    let rows = products.list_products_by_owner(&caller.id).await?;
    Ok(rows.into_iter().map(ProductResponse::from).collect())
}

/// Fetch any product by id. Public: no ownership check.
pub async fn get(products: &dyn ProductStore, raw_id: &str) -> AppResult<ProductResponse> {
    let id = product_id(raw_id)?;
    products
        .get_product(&id)
        .await?
        .map(ProductResponse::from)
        .ok_or_else(not_found)
}

/// Partially update a product the caller owns.
///
/// Order of checks: existence (404), ownership (403), field validation (400).
pub async fn update(
    products: &dyn ProductStore,
    caller: &User,
    raw_id: &str,
    req: UpdateProductRequest,
) -> AppResult<ProductResponse> {
    let id = product_id(raw_id)?;
    let existing = products.get_product(&id).await?.ok_or_else(not_found)?;
    if existing.user_id != caller.id {
        debug!(product_id = %id, user_id = %caller.id, "update refused: not owner");
        return Err(AppError::Forbidden(messages::FORBIDDEN_UPDATE.into()));
    }

    let patch = validate_product_patch(req)?;
    let updated = products
        .update_product(&id, patch)
        .await
        .map_err(|e| AppError::from(e).internal_as_bad_request(messages::PRODUCT_NOT_SAVED))?
        // Deleted between the ownership check and the write.
        .ok_or_else(not_found)?;
    info!(product_id = %id, "product updated");
    Ok(updated.into())
}

/// Delete a product the caller owns.
pub async fn delete(
    products: &dyn ProductStore,
    caller: &User,
    raw_id: &str,
) -> AppResult<MessageResponse> {
    let id = product_id(raw_id)?;
    let existing = products.get_product(&id).await?.ok_or_else(not_found)?;
    if existing.user_id != caller.id {
        debug!(product_id = %id, user_id = %caller.id, "delete refused: not owner");
        return Err(AppError::Forbidden(messages::FORBIDDEN_DELETE.into()));
    }

    if !products.delete_product(&id).await? {
        return Err(not_found());
    }
    info!(product_id = %id, "product deleted");
    Ok(MessageResponse {
        message: messages::PRODUCT_DELETED.into(),
    })
}
