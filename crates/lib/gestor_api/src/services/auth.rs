//! Authentication service: register/login flows delegating to `gestor_core::auth`.

use gestor_core::auth::jwt::issue_token;
use gestor_core::auth::password::{hash_password, verify_password};
use gestor_core::models::NewUser;
use gestor_core::store::UserStore;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::messages;
use crate::models::{LoginResponse, RegisterResponse};
use crate::validation::{Credentials, Registration};

/// Register a new user account and issue its first token.
pub async fn register(
    users: &dyn UserStore,
    input: Registration,
    jwt_secret: &[u8],
) -> AppResult<RegisterResponse> {
    register_inner(users, input, jwt_secret)
        .await
        .map_err(|e| e.in_context(messages::REGISTER_FAILED))
}

async fn register_inner(
    users: &dyn UserStore,
    input: Registration,
    jwt_secret: &[u8],
) -> AppResult<RegisterResponse> {
    if users.find_by_email(&input.email).await?.is_some() {
        debug!("registration rejected: email already registered");
        return Err(AppError::Conflict(messages::EMAIL_TAKEN.into()));
    }

    let password_hash = hash_password(&input.password)?;

    // A concurrent registration can still win the race; the store reports
    // that as Duplicate, which maps to the same Conflict.
    let user = users
        .create_user(NewUser {
            name: input.name,
            email: input.email,
            password_hash,
        })
        .await?;

    let token = issue_token(&user.id, jwt_secret)?;
    info!(user_id = %user.id, "user registered");

    Ok(RegisterResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    })
}

/// Authenticate with email + password.
///
/// Unknown email and wrong password produce the same error.
pub async fn login(
    users: &dyn UserStore,
    input: Credentials,
    jwt_secret: &[u8],
) -> AppResult<LoginResponse> {
    login_inner(users, input, jwt_secret)
        .await
        .map_err(|e| e.in_context(messages::LOGIN_FAILED))
}

async fn login_inner(
    users: &dyn UserStore,
    input: Credentials,
    jwt_secret: &[u8],
) -> AppResult<LoginResponse> {
    let Some(record) = users.find_by_email(&input.email).await? else {
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&input.password, &record.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(&record.user.id, jwt_secret)?;
    debug!(user_id = %record.user.id, "login succeeded");

    Ok(LoginResponse {
        token,
        user: record.user.into(),
    })
}
