//! Request validation.
//!
//! Rules live on the request DTOs as `validator` attributes. Every rule runs
//! and all failing fields are reported at once as [`AppError::Validation`],
//! before any handler logic runs.

use std::sync::LazyLock;

use gestor_core::models::{NewProduct, ProductPatch};
use regex::Regex;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProductRequest, FieldError, LoginRequest, RegisterRequest, UpdateProductRequest,
};

/// Text fields must contain something other than whitespace.
pub(crate) static NOT_BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S").expect("static pattern"));

/// Fields whose submitted value is never echoed back.
const SECRET_FIELDS: &[&str] = &["password"];

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validated login input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Run `req`'s rules and report failures in body field order, one entry per
/// field (its first failing rule).
fn check<T: Validate + Serialize>(req: &T, fields: &[&str]) -> AppResult<()> {
    let Err(errors) = req.validate() else {
        return Ok(());
    };
    let body = serde_json::to_value(req).unwrap_or_default();
    let by_field = errors.field_errors();

    let list = fields
        .iter()
        .filter_map(|path| {
            let first = by_field.get(*path)?.first()?;
            let msg = first.message.as_deref().unwrap_or(first.code.as_ref());
            let value = if SECRET_FIELDS.contains(path) {
                None
            } else {
                body.get(*path).filter(|v| !v.is_null()).cloned()
            };
            Some(FieldError::body(path, value, msg))
        })
        .collect();
    Err(AppError::Validation(list))
}

/// `name` present, `email` well-formed, `password` at least six characters.
pub fn validate_register(req: RegisterRequest) -> AppResult<Registration> {
    check(&req, &["name", "email", "password"])?;
    Ok(Registration {
        name: req.name.unwrap_or_default().trim().to_string(),
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    })
}

/// `email` well-formed, `password` supplied.
pub fn validate_login(req: LoginRequest) -> AppResult<Credentials> {
    check(&req, &["email", "password"])?;
    Ok(Credentials {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    })
}

/// All three fields required; price non-negative.
pub fn validate_new_product(req: CreateProductRequest) -> AppResult<NewProduct> {
    check(&req, &["name", "price", "description"])?;
    Ok(NewProduct {
        name: req.name.unwrap_or_default(),
        price: req.price.unwrap_or_default(),
        description: req.description.unwrap_or_default(),
    })
}

/// Only supplied fields are checked, with the same rules as creation.
pub fn validate_product_patch(req: UpdateProductRequest) -> AppResult<ProductPatch> {
    check(&req, &["name", "price", "description"])?;
    Ok(ProductPatch {
        name: req.name,
        price: req.price,
        description: req.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;

    fn field_paths(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(errors) => errors.into_iter().map(|e| e.path).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn register_reports_every_bad_field() {
        let err = validate_register(RegisterRequest {
            name: Some("  ".into()),
            email: Some("nope".into()),
            password: Some("12345".into()),
        })
        .unwrap_err();
        assert_eq!(field_paths(err), ["name", "email", "password"]);
    }

    #[test]
    fn register_missing_fields_fail_validation() {
        let err = validate_register(RegisterRequest::default()).unwrap_err();
        assert_eq!(field_paths(err), ["name", "email", "password"]);
    }

    #[test]
    fn register_accepts_six_char_password() {
        let ok = validate_register(RegisterRequest {
            name: Some(" Ana ".into()),
            email: Some("ana@example.com".into()),
            password: Some("123456".into()),
        })
        .unwrap();
        assert_eq!(ok.name, "Ana");
        assert_eq!(ok.password, "123456");
    }

    #[test]
    fn password_is_not_echoed() {
        let err = validate_register(RegisterRequest {
            name: Some("Ana".into()),
            email: Some("ana@example.com".into()),
            password: Some("abc".into()),
        })
        .unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert!(errors[0].value.is_none());
        assert_eq!(errors[0].msg, messages::PASSWORD_TOO_SHORT);
    }

    #[test]
    fn login_needs_email_and_password() {
        let err = validate_login(LoginRequest::default()).unwrap_err();
        assert_eq!(field_paths(err), ["email", "password"]);

        // An empty password is still "present"; the credential check rejects it.
        let ok = validate_login(LoginRequest {
            email: Some("a@example.com".into()),
            password: Some(String::new()),
        });
        assert!(ok.is_ok());
    }

    #[test]
    fn new_product_rules() {
        let err = validate_new_product(CreateProductRequest {
            name: None,
            price: Some(-1.0),
            description: Some("".into()),
        })
        .unwrap_err();
        assert_eq!(field_paths(err), ["name", "price", "description"]);

        let p = validate_new_product(CreateProductRequest {
            name: Some("Laptop Gamer".into()),
            price: Some(1500.0),
            description: Some("Laptop con RTX 4060".into()),
        })
        .unwrap();
        assert_eq!(p.price, 1500.0);
    }

    #[test]
    fn messages_match_response_texts() {
        let AppError::Validation(errors) = validate_new_product(CreateProductRequest {
            name: Some("\t".into()),
            price: Some(-0.5),
            description: None,
        })
        .unwrap_err() else {
            panic!("expected validation error");
        };
        let msgs: Vec<_> = errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(
            msgs,
            [
                messages::NAME_REQUIRED,
                messages::PRICE_INVALID,
                messages::DESCRIPTION_REQUIRED
            ]
        );
        assert_eq!(errors[0].value, Some(serde_json::json!("\t")));
        assert_eq!(errors[1].value, Some(serde_json::json!(-0.5)));
        assert!(errors[2].value.is_none());

        let AppError::Validation(errors) = validate_new_product(CreateProductRequest::default())
            .unwrap_err()
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors[1].msg, messages::PRICE_REQUIRED);

        let AppError::Validation(errors) = validate_login(LoginRequest {
            email: Some("ana@example.com".into()),
            password: None,
        })
        .unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].msg, messages::PASSWORD_REQUIRED);

        let AppError::Validation(errors) = validate_register(RegisterRequest {
            name: Some("Ana".into()),
            email: Some("ana@".into()),
            password: Some("secret1".into()),
        })
        .unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].msg, messages::EMAIL_INVALID);
        assert_eq!(errors[0].value, Some(serde_json::json!("ana@")));
    }

    #[test]
    fn email_shape() {
        for bad in ["plain", "@example.com", "user@", "user@@example.com", "us er@example.com", "user@.com"] {
            let err = validate_login(LoginRequest {
                email: Some(bad.into()),
                password: Some("x".into()),
            });
            assert!(err.is_err(), "{bad} should be rejected");
        }
        for good in ["testuser@example.com", "a.b+tag@sub.example.co"] {
            let ok = validate_login(LoginRequest {
                email: Some(good.into()),
                password: Some("x".into()),
            });
            assert!(ok.is_ok(), "{good} should be accepted");
        }
    }

    #[test]
    fn patch_checks_only_supplied_fields() {
        let patch = validate_product_patch(UpdateProductRequest {
            price: Some(0.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.price, Some(0.0));
        assert!(patch.name.is_none());

        let err = validate_product_patch(UpdateProductRequest {
            name: Some(" ".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(field_paths(err), ["name"]);
    }
}
