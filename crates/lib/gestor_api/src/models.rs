//! Wire models for request and response bodies.
//!
//! Identifiers are exposed as `_id` and timestamps in camelCase, which is
//! the shape the browser frontend consumes.

use chrono::{DateTime, Utc};
use gestor_core::models::{Product, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::NOT_BLANK;

/// `POST /api/auth/register` body. Fields are optional so that missing
/// values surface as field validation errors rather than parse failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(
        required(message = "El nombre es obligatorio"),
        regex(path = *NOT_BLANK, message = "El nombre es obligatorio")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Debe ser un email válido"),
        email(message = "Debe ser un email válido")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "La contraseña debe tener mínimo 6 caracteres"),
        length(min = 6, message = "La contraseña debe tener mínimo 6 caracteres")
    )]
    pub password: Option<String>,
}

/// `POST /api/auth/login` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(
        required(message = "Debe ser un email válido"),
        email(message = "Debe ser un email válido")
    )]
    pub email: Option<String>,
    #[validate(required(message = "La contraseña es obligatoria"))]
    pub password: Option<String>,
}

/// Public user fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// `201` response to a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// `200` response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// `POST /api/products` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateProductRequest {
    #[validate(
        required(message = "El nombre es obligatorio"),
        regex(path = *NOT_BLANK, message = "El nombre es obligatorio")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "El precio es obligatorio"),
        range(min = 0.0, message = "El precio debe ser un número mayor o igual a 0")
    )]
    pub price: Option<f64>,
    #[validate(
        required(message = "La descripción es obligatoria"),
        regex(path = *NOT_BLANK, message = "La descripción es obligatoria")
    )]
    pub description: Option<String>,
}

/// `PUT /api/products/{id}` body: any subset of the editable fields.
///
/// `user` and `_id` are not part of this type, so a body carrying them has
/// those keys dropped during deserialization and ownership cannot be moved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProductRequest {
    #[validate(regex(path = *NOT_BLANK, message = "El nombre es obligatorio"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "El precio debe ser un número mayor o igual a 0"))]
    pub price: Option<f64>,
    #[validate(regex(path = *NOT_BLANK, message = "La descripción es obligatoria"))]
    pub description: Option<String>,
}

/// A product as returned by every product endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub description: String,
    /// Owner id.
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            description: p.description,
            user: p.user_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// `{message}` body used for confirmations and most errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body; `error` carries the underlying failure text when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One failed field check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    pub msg: String,
    pub path: String,
    pub location: String,
}

impl FieldError {
    /// A failed check on a JSON body field.
    pub fn body(path: &str, value: Option<serde_json::Value>, msg: &str) -> Self {
        Self {
            kind: "field".into(),
            value,
            msg: msg.into(),
            path: path.into(),
            location: "body".into(),
        }
    }
}

/// `{errors:[...]}` body for field validation failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}
