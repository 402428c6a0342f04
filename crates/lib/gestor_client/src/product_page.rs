//! State behind the product management page.
//!
//! Mutations patch the local list on success instead of re-fetching. Every
//! failure lands in a single dismissable error banner; nothing is retried.

use tracing::{debug, warn};

use crate::models::{NewProduct, Product, ProductUpdate};
use crate::session::AuthSession;
use crate::storage::SessionStorage;

pub const MSG_NO_PERMISSION_ADD: &str = "No tienes permisos para agregar productos.";
pub const MSG_NO_PERMISSION_DELETE: &str = "No tienes permisos para eliminar productos.";
pub const MSG_NO_PERMISSION_UPDATE: &str = "No tienes permisos para editar productos.";
pub const MSG_DELETE_FAILED: &str = "Error al eliminar producto.";
pub const MSG_EMPTY: &str = "No hay productos registrados.";

/// What the page should render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductView<'a> {
    Loading,
    Empty,
    Table(&'a [Product]),
}

#[derive(Debug)]
pub struct ProductPage {
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
    show_form: bool,
}

impl Default for ProductPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductPage {
    /// A page that has not loaded yet.
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            loading: true,
            error: None,
            show_form: false,
        }
    }

    /// Load the caller's products. Without a token this is a no-op, not an
    /// error: the user simply has not signed in yet.
    pub async fn mount<S: SessionStorage>(&mut self, session: &AuthSession<S>) {
        let Some(token) = session.token() else {
            debug!("No session token; skipping product fetch");
            self.loading = false;
            return;
        };

        self.loading = true;
        match session.api().list_products(&token).await {
            Ok(products) => {
                debug!(count = products.len(), "Products loaded");
                self.products = products;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load products");
                self.error = Some(format!("Error al obtener productos: {e}"));
            }
        }
        self.loading = false;
    }

    /// Create a product and append it on success.
    pub async fn add_product<S: SessionStorage>(
        &mut self,
        session: &AuthSession<S>,
        product: &NewProduct,
    ) -> bool {
        let Some(token) = session.token() else {
            self.error = Some(MSG_NO_PERMISSION_ADD.to_string());
            return false;
        };

        match session.api().create_product(&token, product).await {
            Ok(created) => {
                self.products.push(created);
                self.show_form = false;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to add product");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Apply a partial update and replace the row on success.
    pub async fn update_product<S: SessionStorage>(
        &mut self,
        session: &AuthSession<S>,
        id: &str,
        update: &ProductUpdate,
    ) -> bool {
        let Some(token) = session.token() else {
            self.error = Some(MSG_NO_PERMISSION_UPDATE.to_string());
            return false;
        };

        match session.api().update_product(&token, id, update).await {
            Ok(updated) => {
                if let Some(row) = self.products.iter_mut().find(|p| p.id == updated.id) {
                    *row = updated;
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to update product");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Delete a product and drop it from the list on success.
    pub async fn delete_product<S: SessionStorage>(
        &mut self,
        session: &AuthSession<S>,
        id: &str,
    ) -> bool {
        let Some(token) = session.token() else {
            self.error = Some(MSG_NO_PERMISSION_DELETE.to_string());
            return false;
        };

        match session.api().delete_product(&token, id).await {
            Ok(_) => {
                self.products.retain(|p| p.id != id);
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete product");
                self.error = Some(MSG_DELETE_FAILED.to_string());
                false
            }
        }
    }

    pub fn view(&self) -> ProductView<'_> {
        if self.loading {
            ProductView::Loading
        } else if self.products.is_empty() {
            ProductView::Empty
        } else {
            ProductView::Table(&self.products)
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn show_form(&self) -> bool {
        self.show_form
    }

    pub fn open_form(&mut self) {
        self.show_form = true;
    }

    pub fn close_form(&mut self) {
        self.show_form = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::storage::MemoryStorage;

    fn signed_out() -> AuthSession<MemoryStorage> {
        let api = ApiClient::new("http://127.0.0.1:9/api").unwrap();
        AuthSession::hydrate(api, MemoryStorage::new())
    }

    #[test]
    fn starts_loading() {
        let page = ProductPage::new();
        assert_eq!(page.view(), ProductView::Loading);
        assert!(!page.show_form());
    }

    #[tokio::test]
    async fn mount_without_token_is_not_an_error() {
        let mut page = ProductPage::new();
        page.mount(&signed_out()).await;
        assert_eq!(page.view(), ProductView::Empty);
        assert!(page.error().is_none());
    }

    #[tokio::test]
    async fn mutations_without_token_show_permission_banner() {
        let session = signed_out();
        let mut page = ProductPage::new();

        let product = NewProduct {
            name: "Silla".into(),
            price: 1.0,
            description: "d".into(),
        };
        assert!(!page.add_product(&session, &product).await);
        assert_eq!(page.error(), Some(MSG_NO_PERMISSION_ADD));

        page.dismiss_error();
        assert!(page.error().is_none());

        assert!(!page.delete_product(&session, "x").await);
        assert_eq!(page.error(), Some(MSG_NO_PERMISSION_DELETE));
    }

    #[test]
    fn form_toggle() {
        let mut page = ProductPage::new();
        page.open_form();
        assert!(page.show_form());
        page.close_form();
        assert!(!page.show_form());
    }
}
