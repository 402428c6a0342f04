//! # gestor_client
//!
//! Client side of Gestor de Productos: a typed HTTP client for the API, the
//! session cache backed by an injected [`storage::SessionStorage`], and the
//! state machines behind the product page and the forms.
//!
//! Nothing here is global. The caller builds one [`session::AuthSession`]
//! at its composition root and passes it to whatever needs it.

pub mod api;
pub mod error;
pub mod forms;
pub mod models;
pub mod product_page;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use product_page::{ProductPage, ProductView};
pub use session::AuthSession;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
