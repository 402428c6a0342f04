//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the user id, issue time and a 30 day
//! expiry. There is no server-side record of issued tokens, so a token stays
//! valid until it expires.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};
use uuid::Uuid;

use super::AuthError;
use crate::models::TokenClaims;

/// Session token lifetime: 30 days.
pub const TOKEN_EXPIRY_DAYS: i64 = 30;

/// Issue a signed session token for `user_id`.
pub fn issue_token(user_id: &Uuid, secret: &[u8]) -> Result<String, AuthError> {
    issue_token_at(user_id, secret, Utc::now())
}

/// Issue a token as if the current time were `now`.
pub fn issue_token_at(
    user_id: &Uuid,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Result<String, AuthError> {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_EXPIRY_DAYS)).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a session token and return the embedded user id.
///
/// Fails on a bad signature, malformed payload or elapsed expiry. No clock
/// skew is tolerated.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Uuid, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let data = decode::<TokenClaims>(token, &key, &validation)
        .map_err(|e| AuthError::TokenError(format!("jwt decode: {e}")))?;

    Uuid::parse_str(&data.claims.sub)
        .map_err(|e| AuthError::TokenError(format!("invalid subject: {e}")))
}

/// Resolve the JWT secret: env var `JWT_SECRET` → persisted file → generated.
pub fn resolve_jwt_secret() -> String {
    let from_env = std::env::var("JWT_SECRET").ok();
    resolve_jwt_secret_from(from_env.as_deref(), &jwt_secret_path())
}

/// Resolve from a non-empty `from_env`, else the file at `path`, else a
/// fresh secret that is written to `path` for the next start.
pub fn resolve_jwt_secret_from(from_env: Option<&str>, path: &Path) -> String {
    if let Some(secret) = from_env.filter(|s| !s.is_empty()) {
        return secret.to_string();
    }
    if let Ok(existing) = fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    match persist_secret(path, &secret) {
        Ok(()) => info!(path = %path.display(), "generated new JWT secret"),
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "generated JWT secret could not be saved; issued tokens will not survive a restart"
        ),
    }
    secret
}

fn persist_secret(path: &Path, secret: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, secret)
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gestor")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn issued_token_verifies_to_same_user() {
        let id = Uuid::new_v4();
        let token = issue_token(&id, SECRET).unwrap();
        assert_eq!(verify_token(&token, SECRET).unwrap(), id);
    }

    #[test]
    fn token_expires_after_thirty_days() {
        let id = Uuid::new_v4();
        let issued = Utc::now() - Duration::days(TOKEN_EXPIRY_DAYS) - Duration::seconds(1);
        let token = issue_token_at(&id, SECRET, issued).unwrap();
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AuthError::TokenError(_))
        ));
    }

    #[test]
    fn token_still_valid_just_before_expiry() {
        let id = Uuid::new_v4();
        let issued = Utc::now() - Duration::days(TOKEN_EXPIRY_DAYS) + Duration::minutes(5);
        let token = issue_token_at(&id, SECRET, issued).unwrap();
        assert_eq!(verify_token(&token, SECRET).unwrap(), id);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&Uuid::new_v4(), SECRET).unwrap();
        assert!(verify_token(&token, b"other-secret").is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify_token("not.a.jwt", SECRET).is_err());
        assert!(verify_token("", SECRET).is_err());
    }

    #[test]
    fn env_secret_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("jwt-secret");
        assert_eq!(resolve_jwt_secret_from(Some("from-env"), &path), "from-env");
        assert!(!path.exists());
    }

    #[test]
    fn generated_secret_is_persisted_and_reused() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("gestor").join("jwt-secret");

        let first = resolve_jwt_secret_from(Some(""), &path);
        assert_eq!(first.len(), 64);
        assert_eq!(fs::read_to_string(&path).unwrap(), first);

        assert_eq!(resolve_jwt_secret_from(None, &path), first);
    }

    #[test]
    fn unsaveable_secret_is_still_returned() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let path = blocker.join("jwt-secret");

        let first = resolve_jwt_secret_from(None, &path);
        assert_eq!(first.len(), 64);
        assert!(!path.exists());
        // Nothing was saved, so the next resolution generates a new one.
        assert_ne!(resolve_jwt_secret_from(None, &path), first);
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: "12345".into(),
            iat: now.timestamp(),
            exp: (now + Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }
}
