//! Client-side authentication session.
//!
//! Holds the signed-in user in memory and mirrors it into a
//! [`SessionStorage`]. Hydration never fails: unreadable or corrupt entries
//! are treated as signed out.

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::forms::Registration;
use crate::models::SessionUser;
use crate::storage::{SessionStorage, TOKEN_KEY, USER_KEY};

pub struct AuthSession<S: SessionStorage> {
    api: ApiClient,
    storage: S,
    user: Option<SessionUser>,
}

impl<S: SessionStorage> AuthSession<S> {
    /// Restore the session from `storage`.
    pub fn hydrate(api: ApiClient, storage: S) -> Self {
        let user = match storage.get(USER_KEY) {
            Some(raw) if raw != "undefined" => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable cached user");
                    None
                }
            },
            _ => None,
        };
        Self { api, storage, user }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The user's token, falling back to the separately cached token.
    pub fn token(&self) -> Option<String> {
        self.user
            .as_ref()
            .and_then(|u| u.token.clone())
            .or_else(|| self.storage.get(TOKEN_KEY))
    }

    /// Sign in; on failure the previous state is left untouched.
    pub async fn try_login(&mut self, email: &str, password: &str) -> ClientResult<&SessionUser> {
        let resp = self.api.login(email, password).await?;
        let user = SessionUser {
            id: resp.user.id,
            name: resp.user.name,
            email: resp.user.email,
            token: Some(resp.token),
        };
        self.persist(user)
    }

    /// Sign in, reporting only success.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        match self.try_login(email, password).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Login failed");
                false
            }
        }
    }

    /// Create an account and sign in with the returned token.
    pub async fn register(&mut self, form: &Registration) -> ClientResult<&SessionUser> {
        let resp = self
            .api
            .register(&form.name, &form.email, &form.password)
            .await?;
        let user = SessionUser {
            id: resp.id,
            name: resp.name,
            email: resp.email,
            token: Some(resp.token),
        };
        self.persist(user)
    }

    /// Forget the session locally. The server keeps no session state.
    pub fn logout(&mut self) {
        for key in [USER_KEY, TOKEN_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to clear cached session entry");
            }
        }
        self.user = None;
        debug!("Signed out");
    }

    // Storage first so a write failure leaves the in-memory state unchanged.
    fn persist(&mut self, user: SessionUser) -> ClientResult<&SessionUser> {
        let json = serde_json::to_string(&user)?;
        self.storage.set(USER_KEY, &json)?;
        if let Some(token) = &user.token {
            self.storage.set(TOKEN_KEY, token)?;
        }
        debug!(user_id = %user.id, "Session stored");
        Ok(&*self.user.insert(user))
    }
}
