//! Auth Gate: Bearer token extraction, verification and user resolution.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use gestor_core::auth::jwt::verify_token;
use gestor_core::models::User;
use tracing::debug;

use crate::AppState;
use crate::error::AppError;
use crate::messages;

/// The resolved caller, stored in request extensions. Never carries the
/// password hash.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// Returns `None` when the header is absent or does not start with
/// `Bearer`. The token is the second space-separated part, so `"Bearer"`
/// alone or `"Bearer  x"` yield an empty token, which fails verification.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    if !value.starts_with("Bearer") {
        return None;
    }
    Some(value.split(' ').nth(1).unwrap_or(""))
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies it,
/// loads the user it names and injects `AuthenticatedUser` into request
/// extensions. The lookup is done on every request; nothing is cached.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized(messages::TOKEN_MISSING.into()))?;

    let user_id = verify_token(token, state.config.jwt_secret.as_bytes()).map_err(|e| {
        debug!(error = %e, "token rejected");
        AppError::Unauthorized(messages::TOKEN_INVALID.into())
    })?;

    let user = state
        .users
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(messages::USER_NOT_FOUND.into()))?;

    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(v) = value {
            map.insert(AUTHORIZATION, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn absent_header_has_no_token() {
        assert_eq!(bearer_token(&headers(None)), None);
    }

    #[test]
    fn other_schemes_have_no_token() {
        assert_eq!(bearer_token(&headers(Some("Basic dXNlcjpwdw=="))), None);
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(bearer_token(&headers(Some("Bearer abc.def.ghi"))), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers(Some("Bearer"))), Some(""));
    }

    #[test]
    fn only_a_single_space_separates_scheme_and_token() {
        assert_eq!(bearer_token(&headers(Some("Bearer  abc"))), Some(""));
        assert_eq!(bearer_token(&headers(Some("Bearer abc extra"))), Some("abc"));
        assert_eq!(bearer_token(&headers(Some("Bearerabc"))), Some(""));
    }
}
