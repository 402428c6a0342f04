//! Product request handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use axum_extra::extract::WithRejection;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    CreateProductRequest, MessageResponse, ProductResponse, UpdateProductRequest,
};
use crate::services::products;

/// `POST /api/products`: create a product owned by the caller.
pub async fn create_product_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreateProductRequest>, AppError>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let product = products::create(state.products.as_ref(), &user, body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /api/products`: the caller's products.
pub async fn list_products_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let list = products::list_mine(state.products.as_ref(), &user).await?;
    Ok(Json(list))
}

/// `GET /api/products/{id}`: public fetch.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = products::get(state.products.as_ref(), &id).await?;
    Ok(Json(product))
}

/// `PUT /api/products/{id}`: partial update by the owner.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateProductRequest>, AppError>,
) -> AppResult<Json<ProductResponse>> {
    let product = products::update(state.products.as_ref(), &user, &id, body).await?;
    Ok(Json(product))
}

/// `DELETE /api/products/{id}`: delete by the owner.
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let resp = products::delete(state.products.as_ref(), &user, &id).await?;
    Ok(Json(resp))
}
