//! # gestor_api
//!
//! HTTP API library for Gestor de Productos.

pub mod config;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{MethodRouter, get, post, put};
use gestor_core::store::{MemoryStore, PgStore, ProductStore, UserStore};
use sqlx::PgPool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ApiConfig;
use crate::handlers::{auth, fallback, products};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential store.
    pub users: Arc<dyn UserStore>,
    /// Product store.
    pub products: Arc<dyn ProductStore>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// State backed by a single store implementing both traits.
    pub fn with_store<S>(store: S, config: ApiConfig) -> Self
    where
        S: UserStore + ProductStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            products: store,
            config,
        }
    }

    /// State backed by PostgreSQL.
    pub fn postgres(pool: PgPool, config: ApiConfig) -> Self {
        Self::with_store(PgStore::new(pool), config)
    }

    /// State backed by process memory. Data is lost on exit.
    pub fn in_memory(config: ApiConfig) -> Self {
        Self::with_store(MemoryStore::new(), config)
    }
}

/// Run embedded database migrations.
///
/// Delegates to `gestor_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    gestor_core::migrate::migrate(pool).await
}

/// CORS for the browser frontend. Credentials are allowed, so origins,
/// methods and headers are listed explicitly.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}

/// Register `method_router` at `path` and at `path/`, so a trailing slash
/// reaches the same handlers.
fn route_lenient(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}

/// Builds the Axum router with all routes and shared state.
///
/// Unknown paths and known paths with an unsupported method both get the
/// JSON 404.
pub fn router(state: AppState) -> Router {
    let require_auth =
        axum::middleware::from_fn_with_state(state.clone(), middleware::auth::require_auth);

    let mut app = Router::new();
    // Public routes (no auth required)
    app = route_lenient(app, routes::POST_AUTH_REGISTER, post(auth::register_handler));
    app = route_lenient(app, routes::POST_AUTH_LOGIN, post(auth::login_handler));
    // Product collection: all methods require auth
    app = route_lenient(
        app,
        routes::PRODUCTS,
        post(products::create_product_handler)
            .get(products::list_products_handler)
            .route_layer(require_auth.clone()),
    );
    // Single product: public read, owner-only mutation
    app = route_lenient(
        app,
        routes::PRODUCTS_ID,
        get(products::get_product_handler).merge(
            put(products::update_product_handler)
                .delete(products::delete_product_handler)
                .route_layer(require_auth),
        ),
    );

    app.fallback(fallback::not_found_handler)
        .method_not_allowed_fallback(fallback::not_found_handler)
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(fallback::panic_response))
        .with_state(state)
}
