//! Route paths, using axum 0.8 `{param}` syntax.

pub const POST_AUTH_REGISTER: &str = "/api/auth/register";
pub const POST_AUTH_LOGIN: &str = "/api/auth/login";
pub const PRODUCTS: &str = "/api/products";
pub const PRODUCTS_ID: &str = "/api/products/{id}";
